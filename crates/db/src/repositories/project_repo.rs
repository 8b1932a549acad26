//! Repository for the `projects` table.

use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::{Project, ProjectFields, ProjectStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category, location, year, area, description, tags, status, \
     featured, sort_order, before_image, after_image, gallery, created_at, updated_at";

/// Provides CRUD and ordering operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project at the given display order, returning the
    /// created row.
    pub async fn create(
        pool: &PgPool,
        fields: &ProjectFields,
        sort_order: i32,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, category, location, year, area, description, tags,
                                   status, featured, sort_order, before_image, after_image, gallery)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&fields.title)
            .bind(&fields.category)
            .bind(&fields.location)
            .bind(&fields.year)
            .bind(&fields.area)
            .bind(&fields.description)
            .bind(&fields.tags)
            .bind(fields.status)
            .bind(fields.featured)
            .bind(sort_order)
            .bind(fields.before_image.as_ref().map(Json))
            .bind(fields.after_image.as_ref().map(Json))
            .bind(Json(&fields.gallery))
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects in display order, optionally filtered by status.
    ///
    /// `id` breaks ties so the sequence stays deterministic even if a
    /// failed reorder left duplicate `sort_order` values behind.
    pub async fn list_ordered(
        pool: &PgPool,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM projects WHERE status = $1
                     ORDER BY sort_order ASC, id ASC"
                );
                sqlx::query_as::<_, Project>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM projects ORDER BY sort_order ASC, id ASC");
                sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
            }
        }
    }

    /// Number of projects in the collection.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }

    /// Replace the full mutable field set of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2, category = $3, location = $4, year = $5, area = $6,
                description = $7, tags = $8, status = $9, featured = $10,
                before_image = $11, after_image = $12, gallery = $13,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.category)
            .bind(&fields.location)
            .bind(&fields.year)
            .bind(&fields.area)
            .bind(&fields.description)
            .bind(&fields.tags)
            .bind(fields.status)
            .bind(fields.featured)
            .bind(fields.before_image.as_ref().map(Json))
            .bind(fields.after_image.as_ref().map(Json))
            .bind(Json(&fields.gallery))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write one `(id, sort_order)` assignment. Returns `true` if the row
    /// exists.
    pub async fn set_sort_order(
        pool: &PgPool,
        id: DbId,
        sort_order: i32,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET sort_order = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(sort_order)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
