//! Filesystem-backed image pool.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use postpilot_core::error::AssetError;
use postpilot_core::ports::{AssetStore, ImageAsset, ImageMetadata};

/// Extensions admitted into the image pool.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Asset store configuration.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Root upload directory; images live under `<upload_dir>/images`.
    pub upload_dir: PathBuf,
    /// URL prefix under which the images directory is served.
    pub public_base: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            public_base: "/uploads/images".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            public_base: std::env::var("UPLOAD_PUBLIC_BASE")
                .unwrap_or_else(|_| "/uploads/images".to_string()),
        }
    }
}

/// Image pool over a local directory. The directory is created on first use.
pub struct FsAssetStore {
    images_dir: PathBuf,
    public_base: String,
}

impl FsAssetStore {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            images_dir: config.upload_dir.join("images"),
            public_base: config.public_base,
        }
    }

    async fn ensure_dir(&self) -> Result<(), AssetError> {
        tokio::fs::create_dir_all(&self.images_dir).await?;
        Ok(())
    }

    fn asset_for(&self, filename: &str) -> ImageAsset {
        ImageAsset {
            filename: filename.to_string(),
            path: self.images_dir.join(filename).to_string_lossy().into_owned(),
            url: format!("{}/{}", self.public_base, filename),
        }
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn list_images(&self) -> Result<Vec<ImageAsset>, AssetError> {
        self.ensure_dir().await?;

        let mut filenames = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.images_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    filenames.push(name.to_string());
                }
            }
        }

        // Directory order is platform-dependent; sort for a stable pick.
        filenames.sort();
        Ok(filenames.iter().map(|n| self.asset_for(n)).collect())
    }

    async fn store_image(&self, filename: &str, bytes: &[u8]) -> Result<ImageAsset, AssetError> {
        self.ensure_dir().await?;
        tokio::fs::write(self.images_dir.join(filename), bytes).await?;
        Ok(self.asset_for(filename))
    }

    async fn delete_image(&self, filename: &str) -> Result<(), AssetError> {
        let path = self.images_dir.join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn image_metadata(&self, filename: &str) -> Result<ImageMetadata, AssetError> {
        let path = self.images_dir.join(filename);
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssetError::NotFound(filename.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        Ok(ImageMetadata {
            filename: filename.to_string(),
            size_bytes: metadata.len(),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> FsAssetStore {
        FsAssetStore::new(AssetConfig {
            upload_dir: dir.to_path_buf(),
            public_base: "/uploads/images".to_string(),
        })
    }

    #[tokio::test]
    async fn listing_creates_the_directory_and_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let images = store.list_images().await.unwrap();
        assert!(images.is_empty());
        assert!(tmp.path().join("images").is_dir());
    }

    #[tokio::test]
    async fn listing_filters_extensions_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        store.store_image("b.png", b"png").await.unwrap();
        store.store_image("a.jpg", b"jpg").await.unwrap();
        store.store_image("notes.txt", b"txt").await.unwrap();

        let images = store.list_images().await.unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.png"]);
        assert_eq!(images[0].url, "/uploads/images/a.jpg");
    }

    #[tokio::test]
    async fn metadata_reports_size_and_format() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        store.store_image("pic.webp", b"12345").await.unwrap();
        let metadata = store.image_metadata("pic.webp").await.unwrap();

        assert_eq!(metadata.size_bytes, 5);
        assert_eq!(metadata.format, "webp");
    }

    #[tokio::test]
    async fn delete_missing_image_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        store.list_images().await.unwrap();

        let err = store.delete_image("ghost.png").await.unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_image_from_the_pool() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        store.store_image("one.png", b"x").await.unwrap();
        store.delete_image("one.png").await.unwrap();

        assert!(store.list_images().await.unwrap().is_empty());
    }
}
