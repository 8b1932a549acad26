use std::sync::Arc;

use folio_media::AssetStore;

use crate::config::ServerConfig;
use crate::services::projects::ProjectService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Remote media store (uploads go straight through).
    pub assets: Arc<dyn AssetStore>,
    /// Project lifecycle service (create/update/delete/reorder).
    pub projects: ProjectService,
}
