//! Remote asset references.
//!
//! Every image stored on a project is a `(url, asset_id)` pair pointing at
//! externally hosted media. The `asset_id` is the handle the media provider
//! accepts for deletion; the `url` is what the public site renders.

use serde::{Deserialize, Serialize};

/// A reference to one remotely hosted asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub url: String,
    pub asset_id: String,
}

impl AssetRef {
    pub fn new(url: impl Into<String>, asset_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            asset_id: asset_id.into(),
        }
    }
}
