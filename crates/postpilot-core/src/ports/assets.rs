//! Asset store port - the file-backed image pool.

use async_trait::async_trait;

use crate::error::AssetError;

/// An image in the pool, addressable by filename.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImageAsset {
    pub filename: String,
    /// Storage-local path.
    pub path: String,
    /// Public-accessible URL.
    pub url: String,
}

/// Cheap metadata derived without decoding the image.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImageMetadata {
    pub filename: String,
    pub size_bytes: u64,
    pub format: String,
}

/// File-backed pool of candidate post images.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// All images in the pool, in a stable order.
    async fn list_images(&self) -> Result<Vec<ImageAsset>, AssetError>;

    async fn store_image(&self, filename: &str, bytes: &[u8]) -> Result<ImageAsset, AssetError>;

    async fn delete_image(&self, filename: &str) -> Result<(), AssetError>;

    async fn image_metadata(&self, filename: &str) -> Result<ImageMetadata, AssetError>;
}
