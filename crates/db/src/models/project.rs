//! Project entity model and DTOs.

use std::collections::HashSet;

use folio_core::asset::AssetRef;
use folio_core::types::{DbId, Timestamp};
use folio_core::validation::ProjectFacts;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Project visibility status. Controls what the public site renders, not
/// ordering: all statuses share one display-order space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Published,
    Archived,
}

impl ProjectStatus {
    pub fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub location: String,
    pub year: String,
    pub area: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub sort_order: i32,
    #[sqlx(json(nullable))]
    pub before_image: Option<AssetRef>,
    #[sqlx(json(nullable))]
    pub after_image: Option<AssetRef>,
    #[sqlx(json)]
    pub gallery: Vec<AssetRef>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Every remote asset id the row references.
    pub fn referenced_asset_ids(&self) -> HashSet<String> {
        asset_ids(&self.before_image, &self.after_image, &self.gallery)
    }
}

/// The full mutable field set of a project: everything except identity,
/// display order, and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFields {
    pub title: String,
    pub category: String,
    pub location: String,
    pub year: String,
    pub area: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub before_image: Option<AssetRef>,
    pub after_image: Option<AssetRef>,
    pub gallery: Vec<AssetRef>,
}

impl ProjectFields {
    /// Borrowed view for [`folio_core::validation::validate_project`].
    pub fn facts(&self) -> ProjectFacts<'_> {
        ProjectFacts {
            title: &self.title,
            category: &self.category,
            location: &self.location,
            year: &self.year,
            area: &self.area,
            description: &self.description,
            tags: &self.tags,
            published: self.status.is_published(),
            has_after_image: self.after_image.is_some(),
        }
    }

    /// Every remote asset id the field set references.
    pub fn referenced_asset_ids(&self) -> HashSet<String> {
        asset_ids(&self.before_image, &self.after_image, &self.gallery)
    }
}

fn asset_ids(
    before: &Option<AssetRef>,
    after: &Option<AssetRef>,
    gallery: &[AssetRef],
) -> HashSet<String> {
    before
        .iter()
        .chain(after.iter())
        .chain(gallery.iter())
        .map(|asset| asset.asset_id.clone())
        .collect()
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub category: String,
    pub location: String,
    pub year: String,
    pub area: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<ProjectStatus>,
    pub featured: Option<bool>,
    /// Defaults to append-to-end (current collection size) if omitted.
    pub sort_order: Option<i32>,
    pub before_image: Option<AssetRef>,
    pub after_image: Option<AssetRef>,
    pub gallery: Option<Vec<AssetRef>>,
}

impl CreateProject {
    /// Split the request into the stored field set and the optional
    /// caller-supplied display order.
    pub fn into_parts(self) -> (ProjectFields, Option<i32>) {
        let fields = ProjectFields {
            title: self.title,
            category: self.category,
            location: self.location,
            year: self.year,
            area: self.area,
            description: self.description,
            tags: self.tags,
            status: self.status.unwrap_or(ProjectStatus::Draft),
            featured: self.featured.unwrap_or(false),
            before_image: self.before_image,
            after_image: self.after_image,
            gallery: self.gallery.unwrap_or_default(),
        };
        (fields, self.sort_order)
    }
}

/// DTO for updating an existing project. All fields are optional.
///
/// `before_image` distinguishes "leave alone" (absent) from "clear"
/// (explicit null). `after_image` can only be replaced, never cleared: a
/// project keeps an after image for its whole life once one is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub year: Option<String>,
    pub area: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub before_image: Option<Option<AssetRef>>,
    pub after_image: Option<AssetRef>,
    pub gallery: Option<Vec<AssetRef>>,
}

impl UpdateProject {
    /// Merge this patch over the current row into a full field set.
    pub fn merged_with(&self, current: &Project) -> ProjectFields {
        ProjectFields {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| current.category.clone()),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| current.location.clone()),
            year: self.year.clone().unwrap_or_else(|| current.year.clone()),
            area: self.area.clone().unwrap_or_else(|| current.area.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            tags: self.tags.clone().unwrap_or_else(|| current.tags.clone()),
            status: self.status.unwrap_or(current.status),
            featured: self.featured.unwrap_or(current.featured),
            before_image: match &self.before_image {
                Some(explicit) => explicit.clone(),
                None => current.before_image.clone(),
            },
            after_image: self
                .after_image
                .clone()
                .or_else(|| current.after_image.clone()),
            gallery: self
                .gallery
                .clone()
                .unwrap_or_else(|| current.gallery.clone()),
        }
    }
}

/// Deserialize a field that may be absent, `null`, or a value into
/// `None` / `Some(None)` / `Some(Some(value))` respectively.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn asset(id: &str) -> AssetRef {
        AssetRef::new(format!("https://cdn.example/{id}.jpg"), id)
    }

    fn sample_project() -> Project {
        Project {
            id: 7,
            title: "Canal house".to_string(),
            category: "residential".to_string(),
            location: "Amsterdam".to_string(),
            year: "2023".to_string(),
            area: "90 m2".to_string(),
            description: "Gut renovation.".to_string(),
            tags: vec!["renovation".to_string()],
            status: ProjectStatus::Published,
            featured: false,
            sort_order: 2,
            before_image: Some(asset("before-1")),
            after_image: Some(asset("after-1")),
            gallery: vec![asset("g-1"), asset("g-2")],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn referenced_asset_ids_covers_all_three_slots() {
        let ids = sample_project().referenced_asset_ids();
        assert_eq!(ids.len(), 4);
        for id in ["before-1", "after-1", "g-1", "g-2"] {
            assert!(ids.contains(id));
        }
    }

    #[test]
    fn empty_patch_merges_to_identical_fields() {
        let current = sample_project();
        let merged = UpdateProject::default().merged_with(&current);
        assert_eq!(merged.title, current.title);
        assert_eq!(merged.status, current.status);
        assert_eq!(merged.before_image, current.before_image);
        assert_eq!(merged.gallery, current.gallery);
    }

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let current = sample_project();
        let patch = UpdateProject {
            title: Some("Canal house II".to_string()),
            after_image: Some(asset("after-2")),
            ..UpdateProject::default()
        };
        let merged = patch.merged_with(&current);
        assert_eq!(merged.title, "Canal house II");
        assert_eq!(merged.after_image, Some(asset("after-2")));
        assert_eq!(merged.category, current.category);
    }

    #[test]
    fn explicit_null_clears_before_image() {
        let current = sample_project();
        let patch = UpdateProject {
            before_image: Some(None),
            ..UpdateProject::default()
        };
        assert_eq!(patch.merged_with(&current).before_image, None);
    }

    #[test]
    fn absent_before_image_is_left_alone() {
        let current = sample_project();
        let merged = UpdateProject::default().merged_with(&current);
        assert_eq!(merged.before_image, Some(asset("before-1")));
    }

    #[test]
    fn before_image_deserializes_three_ways() {
        let absent: UpdateProject = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.before_image, None);

        let cleared: UpdateProject = serde_json::from_str(r#"{"before_image": null}"#).unwrap();
        assert_eq!(cleared.before_image, Some(None));

        let replaced: UpdateProject = serde_json::from_str(
            r#"{"before_image": {"url": "https://cdn.example/x.jpg", "asset_id": "x"}}"#,
        )
        .unwrap();
        assert_eq!(
            replaced.before_image,
            Some(Some(AssetRef::new("https://cdn.example/x.jpg", "x")))
        );
    }

    #[test]
    fn create_defaults_to_draft_unfeatured_append() {
        let create = CreateProject {
            title: "New".to_string(),
            category: "c".to_string(),
            location: "l".to_string(),
            year: "2025".to_string(),
            area: "10 m2".to_string(),
            description: "d".to_string(),
            tags: vec!["t".to_string()],
            status: None,
            featured: None,
            sort_order: None,
            before_image: None,
            after_image: None,
            gallery: None,
        };
        let (fields, sort_order) = create.into_parts();
        assert_eq!(fields.status, ProjectStatus::Draft);
        assert!(!fields.featured);
        assert!(fields.gallery.is_empty());
        assert_eq!(sort_order, None);
    }
}
