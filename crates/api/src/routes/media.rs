//! Route definitions for the `/media` resource.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// POST   /upload         -> upload (multipart: file, optional folder)
/// DELETE /{*asset_id}    -> delete_asset (wildcard: ids contain slashes)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(media::upload))
        .route("/{*asset_id}", delete(media::delete_asset))
}
