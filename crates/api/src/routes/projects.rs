//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /               -> list (?status=draft|published|archived)
/// POST   /               -> create
/// POST   /compute-move   -> compute_move_plan (pure, no writes)
/// POST   /reorder        -> reorder
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/move      -> move_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/compute-move", post(project::compute_move_plan))
        .route("/reorder", post(project::reorder))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/move", post(project::move_project))
}
