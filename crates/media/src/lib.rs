//! Remote media store integration.
//!
//! [`store::AssetStore`] is the contract the lifecycle service consumes:
//! upload a file and get back a `(url, asset_id)` pair, delete one asset,
//! or delete a batch with per-id outcomes. [`cloudinary::CloudinaryStore`]
//! is the production implementation.

pub mod cloudinary;
pub mod store;

pub use cloudinary::{CloudinaryConfig, CloudinaryStore};
pub use store::{AssetStore, BatchDeleteReport, MediaError, UploadFile};
