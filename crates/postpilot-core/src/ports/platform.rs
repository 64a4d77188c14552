//! Platform publish port - abstraction over social-media publish APIs.

use async_trait::async_trait;

use crate::domain::{Platform, PlatformCredentials};
use crate::error::PublishError;

/// The payload delivered to a platform: formatted caption (hashtags already
/// appended) and an optional public image URL.
#[derive(Debug, Clone)]
pub struct PublishContent {
    pub caption: String,
    pub image_url: Option<String>,
}

/// A successful publish: the platform-assigned post id and its public URL.
#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub post_id: String,
    pub url: String,
}

/// One social platform's publish API.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    fn platform(&self) -> Platform;

    async fn publish(
        &self,
        credentials: &PlatformCredentials,
        content: &PublishContent,
    ) -> Result<PublishedPost, PublishError>;
}
