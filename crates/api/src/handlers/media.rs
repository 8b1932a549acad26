//! Handlers for direct media-store operations.
//!
//! Uploads pass straight through to the remote store; the returned
//! [`AssetRef`] is what the client later embeds in a project payload.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use folio_core::asset::AssetRef;
use folio_media::UploadFile;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/media/upload
///
/// Accepts a multipart form with a required `file` field and an optional
/// `folder` field overriding the configured upload folder.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<AssetRef>>)> {
    let mut file: Option<UploadFile> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.jpg").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(UploadFile {
                    bytes: bytes.to_vec(),
                    filename,
                });
            }
            "folder" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                folder = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let folder = folder.unwrap_or_else(|| state.config.media_folder.clone());
    let asset = state.assets.upload(file, &folder).await?;

    tracing::info!(asset_id = %asset.asset_id, "Asset uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// DELETE /api/v1/media/{*asset_id}
///
/// Removes a single remote asset. Asset ids may contain slashes (the store
/// folder is part of the id), hence the wildcard path segment. Unknown ids
/// are treated as already deleted.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<StatusCode> {
    state.assets.delete_one(&asset_id).await?;
    tracing::info!(asset_id = %asset_id, "Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}
