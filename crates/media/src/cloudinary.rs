//! Cloudinary-backed [`AssetStore`].
//!
//! Uses the upload API (`/image/upload`, `/image/destroy`) with SHA-256
//! request signing and the admin API (`/resources/image/upload`) for
//! batched deletion, so a delete stays one round trip regardless of how
//! many gallery images a project carries.

use async_trait::async_trait;
use folio_core::asset::AssetRef;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::store::{AssetStore, BatchDeleteReport, MediaError, UploadFile};

/// Credentials and endpoint for one Cloudinary account.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// API host, overridable for tests (default `https://api.cloudinary.com`).
    pub base_url: String,
}

impl CloudinaryConfig {
    /// Load from `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`,
    /// `CLOUDINARY_API_SECRET`, and optional `CLOUDINARY_BASE_URL`.
    pub fn from_env() -> Self {
        Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")
                .expect("CLOUDINARY_CLOUD_NAME must be set"),
            api_key: std::env::var("CLOUDINARY_API_KEY").expect("CLOUDINARY_API_KEY must be set"),
            api_secret: std::env::var("CLOUDINARY_API_SECRET")
                .expect("CLOUDINARY_API_SECRET must be set"),
            base_url: std::env::var("CLOUDINARY_BASE_URL")
                .unwrap_or_else(|_| "https://api.cloudinary.com".into()),
        }
    }
}

/// HTTP client for one Cloudinary account.
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct BulkDeleteResponse {
    /// Map of public id to per-id outcome (`"deleted"`, `"not_found"`, ...).
    deleted: std::collections::HashMap<String, String>,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a store reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { client, config }
    }

    fn upload_api(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{action}",
            self.config.base_url, self.config.cloud_name
        )
    }

    /// Sign request parameters per the Cloudinary scheme: parameters sorted
    /// by name, joined as a query string, secret appended, then hashed.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        sha256_hex(&format!(
            "{}{}",
            signature_payload(params),
            self.config.api_secret
        ))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MediaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AssetStore for CloudinaryStore {
    async fn upload(&self, file: UploadFile, folder: &str) -> Result<AssetRef, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", Part::bytes(file.bytes).file_name(file.filename));

        let response = self
            .client
            .post(self.upload_api("upload"))
            .multipart(form)
            .send()
            .await?;

        let parsed: UploadResponse = Self::parse_json(response).await?;
        tracing::debug!(asset_id = %parsed.public_id, "Uploaded asset");
        Ok(AssetRef::new(parsed.secure_url, parsed.public_id))
    }

    async fn delete_one(&self, asset_id: &str) -> Result<(), MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", asset_id), ("timestamp", &timestamp)]);

        let response = self
            .client
            .post(self.upload_api("destroy"))
            .form(&[
                ("public_id", asset_id),
                ("api_key", &self.config.api_key),
                ("timestamp", &timestamp),
                ("signature", &signature),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await?;

        let parsed: DestroyResponse = Self::parse_json(response).await?;
        // "not found" is success: the asset is gone either way.
        if parsed.result == "ok" || parsed.result == "not found" {
            Ok(())
        } else {
            Err(MediaError::Api {
                status: 200,
                body: parsed.result,
            })
        }
    }

    async fn delete_batch(&self, asset_ids: &[String]) -> Result<BatchDeleteReport, MediaError> {
        if asset_ids.is_empty() {
            return Ok(BatchDeleteReport::default());
        }

        let url = format!(
            "{}/v1_1/{}/resources/image/upload",
            self.config.base_url, self.config.cloud_name
        );
        let params: Vec<(&str, &str)> = asset_ids
            .iter()
            .map(|id| ("public_ids[]", id.as_str()))
            .collect();

        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&params)
            .send()
            .await?;

        let parsed: BulkDeleteResponse = Self::parse_json(response).await?;

        let mut report = BatchDeleteReport::default();
        for id in asset_ids {
            match parsed.deleted.get(id).map(String::as_str) {
                Some("deleted") | Some("not_found") => report.deleted.push(id.clone()),
                _ => report.failed.push(id.clone()),
            }
        }
        Ok(report)
    }
}

/// Compute a SHA-256 hex digest of the given string.
fn sha256_hex(data: &str) -> String {
    let hash = Sha256::digest(data.as_bytes());
    format!("{hash:x}")
}

/// Build the string-to-sign: parameters sorted by name, `key=value` pairs
/// joined with `&`.
fn signature_payload(params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by_key(|(name, _)| *name);
    sorted
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
