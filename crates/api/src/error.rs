use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::store::StoreError;
use folio_media::MediaError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record-store error from the persistence layer.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A media-store error from an operation the caller asked for directly
    /// (uploads). Cleanup failures never take this path; they are logged.
    #[error("Media store error: {0}")]
    Media(#[from] MediaError),

    /// A reorder batch where some order writes landed and some did not.
    /// The client must discard its optimistic state and re-fetch.
    #[error("Reorder partially applied: {} written, {} failed", applied.len(), failed.len())]
    ReorderPartial {
        applied: Vec<DbId>,
        failed: Vec<DbId>,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Store(StoreError::Database(err)) => classify_sqlx_error(err),
            AppError::Store(StoreError::Unavailable(msg)) => {
                tracing::error!(error = %msg, "Record store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The record store is unavailable".to_string(),
                )
            }

            // --- Media store errors ---
            AppError::Media(err) => {
                tracing::error!(error = %err, "Media store error");
                (
                    StatusCode::BAD_GATEWAY,
                    "MEDIA_ERROR",
                    "The media store rejected the request".to_string(),
                )
            }

            // --- Partial reorder: body carries both id lists ---
            AppError::ReorderPartial { applied, failed } => {
                let body = json!({
                    "error": "Reorder partially applied; re-fetch the authoritative order",
                    "code": "REORDER_PARTIAL",
                    "applied": applied,
                    "failed": failed,
                });
                return (StatusCode::CONFLICT, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
