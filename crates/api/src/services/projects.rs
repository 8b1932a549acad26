//! Project lifecycle service.
//!
//! Mediates every project mutation against the record store and the asset
//! store so the two never diverge:
//!
//! - Validation runs before any write, so a rejected payload leaves both
//!   stores untouched.
//! - Asset cleanup runs only after the record write that frees the assets
//!   has succeeded (update) or alongside a removal that proceeds
//!   regardless (delete). A record pointing at deleted media is the
//!   failure mode to avoid; an orphaned remote asset is an accepted,
//!   logged degradation.
//! - Reorder writes are applied per row and accounted for individually;
//!   any miss turns the whole batch into [`AppError::ReorderPartial`] and
//!   the client re-fetches the authoritative order.

use std::sync::Arc;

use folio_core::error::CoreError;
use folio_core::ordering::{compute_move, MoveIntent, MovePlan, OrderPair};
use folio_core::types::DbId;
use folio_core::validation::validate_project;
use folio_db::models::project::{CreateProject, Project, ProjectStatus, UpdateProject};
use folio_db::store::ProjectStore;
use folio_media::AssetStore;

use crate::error::{AppError, AppResult};

/// Coordinates project mutations across the record and asset stores.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
    assets: Arc<dyn AssetStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn ProjectStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { store, assets }
    }

    /// All projects in display order, optionally filtered by status.
    pub async fn list(&self, status: Option<ProjectStatus>) -> AppResult<Vec<Project>> {
        Ok(self.store.list_ordered(status).await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Project> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }))
    }

    /// Validate and persist a new project.
    ///
    /// Without an explicit `sort_order` the project is appended to the end
    /// of the collection.
    pub async fn create(&self, input: CreateProject) -> AppResult<Project> {
        let (fields, explicit_order) = input.into_parts();
        validate_project(&fields.facts())?;

        let sort_order = match explicit_order {
            Some(order) if order < 0 => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "sort_order must be >= 0, got {order}"
                ))));
            }
            Some(order) => order,
            None => self.store.count().await? as i32,
        };

        let project = self.store.insert(&fields, sort_order).await?;
        tracing::info!(project_id = project.id, sort_order, "Project created");
        Ok(project)
    }

    /// Merge a patch over the stored row, persist it, then reclaim any
    /// asset the update superseded.
    pub async fn update(&self, id: DbId, patch: UpdateProject) -> AppResult<Project> {
        let current = self.get(id).await?;
        let merged = patch.merged_with(&current);
        validate_project(&merged.facts())?;

        // Old ids no longer referenced after the merge. Computed before the
        // write so a replaced after image or a trimmed gallery is caught;
        // ids still referenced (for example a reordered gallery) stay out.
        let superseded: Vec<String> = current
            .referenced_asset_ids()
            .difference(&merged.referenced_asset_ids())
            .cloned()
            .collect();

        let updated =
            self.store
                .update(id, &merged)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Project",
                    id,
                }))?;

        self.reclaim_assets(superseded, "update").await;

        tracing::info!(project_id = id, "Project updated");
        Ok(updated)
    }

    /// Delete a project and reclaim every asset it referenced.
    ///
    /// One batched delete covers the before image, after image, and the
    /// whole gallery. Record removal proceeds even when the asset store
    /// reports total failure: a deleted project must disappear from the
    /// admin list and the public site no matter what.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let current = self.get(id).await?;

        let asset_ids: Vec<String> = current.referenced_asset_ids().into_iter().collect();
        self.reclaim_assets(asset_ids, "delete").await;

        let deleted = self.store.delete(id).await?;
        if !deleted {
            // The row vanished between the lookup and the delete.
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }));
        }

        tracing::info!(project_id = id, "Project deleted");
        Ok(())
    }

    /// Apply a set of `(id, sort_order)` writes from the ordering engine.
    ///
    /// Returns the ids written in order. Any miss (vanished row or store
    /// error) fails the batch as [`AppError::ReorderPartial`]; the writes
    /// that already landed are not rolled back, the client re-fetches.
    pub async fn reorder(&self, pairs: &[OrderPair]) -> AppResult<Vec<DbId>> {
        validate_reorder_pairs(pairs)?;

        let mut applied = Vec::with_capacity(pairs.len());
        let mut failed = Vec::new();

        for pair in pairs {
            match self.store.set_sort_order(pair.id, pair.sort_order).await {
                Ok(true) => applied.push(pair.id),
                Ok(false) => {
                    tracing::warn!(project_id = pair.id, "Reorder target no longer exists");
                    failed.push(pair.id);
                }
                Err(err) => {
                    tracing::error!(project_id = pair.id, error = %err, "Order write failed");
                    failed.push(pair.id);
                }
            }
        }

        if failed.is_empty() {
            tracing::info!(count = applied.len(), "Reorder applied");
            Ok(applied)
        } else {
            Err(AppError::ReorderPartial { applied, failed })
        }
    }

    /// Server-side convenience for the admin move buttons: fetch the
    /// current sequence, run the ordering engine, persist when something
    /// actually moved.
    pub async fn move_project(&self, intent: &MoveIntent) -> AppResult<MovePlan> {
        let sequence: Vec<DbId> = self
            .store
            .list_ordered(None)
            .await?
            .into_iter()
            .map(|project| project.id)
            .collect();

        let plan = compute_move(&sequence, intent);
        if plan.changed {
            self.reorder(&plan.pairs).await?;
        }
        Ok(plan)
    }

    /// Best-effort batched asset cleanup. Failures are logged, never
    /// propagated: the record mutation that triggered the cleanup has
    /// already been decided.
    async fn reclaim_assets(&self, asset_ids: Vec<String>, operation: &'static str) {
        if asset_ids.is_empty() {
            return;
        }
        match self.assets.delete_batch(&asset_ids).await {
            Ok(report) if report.fully_deleted() => {
                tracing::debug!(count = report.deleted.len(), operation, "Assets reclaimed");
            }
            Ok(report) => {
                tracing::warn!(
                    failed = ?report.failed,
                    operation,
                    "Some superseded assets were not reclaimed"
                );
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    count = asset_ids.len(),
                    operation,
                    "Asset cleanup failed; remote assets may be orphaned"
                );
            }
        }
    }
}

fn validate_reorder_pairs(pairs: &[OrderPair]) -> Result<(), CoreError> {
    let mut seen_ids = std::collections::HashSet::new();
    let mut seen_orders = std::collections::HashSet::new();
    for pair in pairs {
        if pair.sort_order < 0 {
            return Err(CoreError::Validation(format!(
                "sort_order must be >= 0, got {} for project {}",
                pair.sort_order, pair.id
            )));
        }
        if !seen_ids.insert(pair.id) {
            return Err(CoreError::Validation(format!(
                "duplicate project id {} in reorder batch",
                pair.id
            )));
        }
        // Two projects sharing one order would corrupt the sequence at rest.
        if !seen_orders.insert(pair.sort_order) {
            return Err(CoreError::Validation(format!(
                "duplicate sort_order {} in reorder batch",
                pair.sort_order
            )));
        }
    }
    Ok(())
}
