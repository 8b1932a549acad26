//! Asset store contract.

use async_trait::async_trait;
use folio_core::asset::AssetRef;

/// Errors from the media store layer.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("media API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// A file to upload: raw bytes plus the client-supplied name.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Per-id outcome of a batched delete.
///
/// Asset deletion is idempotent: an id the provider no longer knows counts
/// as deleted, not failed.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchDeleteReport {
    pub fn fully_deleted(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remote content store holding every image the site references.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload a file into `folder`, returning its public URL and the id
    /// the store accepts for later deletion.
    async fn upload(&self, file: UploadFile, folder: &str) -> Result<AssetRef, MediaError>;

    /// Delete a single asset by id.
    async fn delete_one(&self, asset_id: &str) -> Result<(), MediaError>;

    /// Delete a batch of assets in one round trip, reporting per-id
    /// outcomes.
    async fn delete_batch(&self, asset_ids: &[String]) -> Result<BatchDeleteReport, MediaError>;
}
