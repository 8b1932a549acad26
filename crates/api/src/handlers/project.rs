//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use folio_core::ordering::{compute_move, MoveDirection, MoveIntent, MovePlan, OrderPair};
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, ProjectStatus, UpdateProject};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for project listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Restrict the listing to one status (`draft`, `published`, `archived`).
    pub status: Option<ProjectStatus>,
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.projects.list(params.status).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = state.projects.get(id).await?;
    Ok(Json(project))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = state.projects.update(id, input).await?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.projects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request body for `/projects/compute-move`.
#[derive(Debug, Deserialize)]
pub struct ComputeMoveRequest {
    /// Project ids in their current display order.
    pub sequence: Vec<DbId>,
    pub intent: MoveIntent,
}

/// POST /api/v1/projects/compute-move
///
/// Pure planning endpoint: runs the ordering engine against a caller-supplied
/// sequence without touching the database. Invalid intents come back as an
/// unchanged no-op plan, never an error.
pub async fn compute_move_plan(
    Json(input): Json<ComputeMoveRequest>,
) -> Json<DataResponse<MovePlan>> {
    let plan = compute_move(&input.sequence, &input.intent);
    Json(DataResponse { data: plan })
}

/// Request body for `/projects/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub pairs: Vec<OrderPair>,
}

/// Response payload for a fully applied reorder.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    /// Ids whose sort order was written, in write order.
    pub applied: Vec<DbId>,
}

/// POST /api/v1/projects/reorder
///
/// Applies a batch of `(id, sort_order)` writes. A partial application
/// surfaces as `409 REORDER_PARTIAL` with both id lists in the body.
pub async fn reorder(
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<ReorderResponse>>> {
    let applied = state.projects.reorder(&input.pairs).await?;
    Ok(Json(DataResponse {
        data: ReorderResponse { applied },
    }))
}

/// Request body for `/projects/{id}/move`.
///
/// Exactly one of the three fields selects the move kind: `direction` for a
/// single step, `target_index` for an absolute position, `target_id` for a
/// drag onto another project.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: Option<MoveDirection>,
    pub target_index: Option<usize>,
    pub target_id: Option<DbId>,
}

/// POST /api/v1/projects/{id}/move
pub async fn move_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<MovePlan>>> {
    // Moving a project that does not exist is a 404, not a silent no-op.
    state.projects.get(id).await?;

    let intent = match (input.direction, input.target_index, input.target_id) {
        (Some(direction), None, None) => MoveIntent::Step { id, direction },
        (None, Some(target_index), None) => MoveIntent::ToPosition { id, target_index },
        (None, None, Some(target_id)) => MoveIntent::Drag {
            dragged_id: id,
            target_id,
        },
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of 'direction', 'target_index', 'target_id'".into(),
            ))
        }
    };

    let plan = state.projects.move_project(&intent).await?;
    Ok(Json(DataResponse { data: plan }))
}
