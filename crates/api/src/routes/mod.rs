pub mod health;
pub mod media;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                  list, create
/// /projects/compute-move     ordering engine dry run (POST)
/// /projects/reorder          apply order writes (POST)
/// /projects/{id}             get, update, delete
/// /projects/{id}/move        server-side move (POST)
///
/// /media/upload              upload asset (POST, multipart)
/// /media/{*asset_id}         delete asset (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project collection, ordering, and lifecycle.
        .nest("/projects", projects::router())
        // Direct media-store passthrough.
        .nest("/media", media::router())
}
