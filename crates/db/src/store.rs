//! Record-store contract for project persistence.
//!
//! The lifecycle service talks to this trait rather than to sqlx directly,
//! so its coordination rules (validate before write, cleanup after write,
//! per-row reorder accounting) can be exercised against an in-memory store
//! in unit tests. [`PgProjectStore`] is the production implementation over
//! [`crate::repositories::ProjectRepo`].

use async_trait::async_trait;
use folio_core::types::DbId;

use crate::models::project::{Project, ProjectFields, ProjectStatus};
use crate::repositories::ProjectRepo;
use crate::DbPool;

/// Errors from the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The store could not be reached at all.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations the lifecycle service needs.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert(&self, fields: &ProjectFields, sort_order: i32)
        -> Result<Project, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError>;

    /// All projects ordered by `sort_order` ascending.
    async fn list_ordered(&self, status: Option<ProjectStatus>)
        -> Result<Vec<Project>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Full-field replacement. `None` when the row does not exist.
    async fn update(&self, id: DbId, fields: &ProjectFields)
        -> Result<Option<Project>, StoreError>;

    /// `true` when a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Write a single order assignment. `false` when the row is gone.
    async fn set_sort_order(&self, id: DbId, sort_order: i32) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed [`ProjectStore`].
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn insert(
        &self,
        fields: &ProjectFields,
        sort_order: i32,
    ) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.pool, fields, sort_order).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_ordered(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list_ordered(&self.pool, status).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(ProjectRepo::count(&self.pool).await?)
    }

    async fn update(
        &self,
        id: DbId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::update(&self.pool, id, fields).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn set_sort_order(&self, id: DbId, sort_order: i32) -> Result<bool, StoreError> {
        Ok(ProjectRepo::set_sort_order(&self.pool, id, sort_order).await?)
    }
}
