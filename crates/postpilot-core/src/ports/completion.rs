//! Caption generation port - abstraction over the completion service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{PastPost, PostingStyle};
use crate::error::GenerationError;

/// Everything the completion service needs to draft a caption.
#[derive(Debug, Clone)]
pub struct CaptionRequest {
    pub niche: String,
    pub style: PostingStyle,
    pub target_audience: String,
    pub trending_topics: Vec<String>,
    pub image_description: Option<String>,
    /// Engagement history; averaged into the prompt when non-empty.
    pub past_engagement: Vec<PastPost>,
}

/// Parsed and validated completion output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCaption {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub trending_topics: Vec<String>,
    pub confidence_score: f64,
}

/// Caption generator - the external language-model completion endpoint.
///
/// Implementations must enforce the strict JSON contract
/// {caption, hashtags, trendingTopics, confidenceScore} and fail with
/// [`GenerationError`] on transport errors or schema mismatches.
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Model identifier recorded in post provenance.
    fn model_name(&self) -> &str;

    async fn generate(&self, request: &CaptionRequest)
    -> Result<GeneratedCaption, GenerationError>;
}
