//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use postpilot_core::domain::{
    AnalyticsEvent, NicheProfile, Post, PostStatus, PostingStyle, Preferences, PublishOutcome,
    User,
};
use postpilot_core::ports::{ImageAsset, ImageMetadata};

// ---- auth ----

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing the access token and the user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserSummary,
}

/// Minimal user info returned at register/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub niche: Option<String>,
    pub is_onboarded: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            niche: user.niche.clone(),
            is_onboarded: user.is_onboarded,
        }
    }
}

// ---- users ----

/// Full profile, without the password hash or stored access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub niche: Option<String>,
    pub niches: Vec<NicheDto>,
    pub target_audience: Option<String>,
    pub posting_style: PostingStyle,
    pub social_accounts: SocialConnections,
    pub preferences: PreferencesDto,
    pub profile_completeness: u8,
    pub is_onboarded: bool,
    pub created_at: DateTime<Utc>,
}

/// Connection flags only; tokens never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialConnections {
    pub facebook: bool,
    pub linkedin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicheDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl From<NicheDto> for NicheProfile {
    fn from(dto: NicheDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            keywords: dto.keywords,
        }
    }
}

impl From<&NicheProfile> for NicheDto {
    fn from(niche: &NicheProfile) -> Self {
        Self {
            name: niche.name.clone(),
            description: niche.description.clone(),
            keywords: niche.keywords.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    pub auto_posting_enabled: bool,
    pub posting_frequency: postpilot_core::domain::PostingFrequency,
    pub best_time_to_post: String,
    pub include_hashtags: bool,
    pub include_trending_topics: bool,
    pub max_hashtags: u32,
}

impl From<&Preferences> for PreferencesDto {
    fn from(p: &Preferences) -> Self {
        Self {
            auto_posting_enabled: p.auto_posting_enabled,
            posting_frequency: p.posting_frequency,
            best_time_to_post: p.best_time_to_post.clone(),
            include_hashtags: p.include_hashtags,
            include_trending_topics: p.include_trending_topics,
            max_hashtags: p.max_hashtags,
        }
    }
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            niche: user.niche.clone(),
            niches: user.niches.iter().map(Into::into).collect(),
            target_audience: user.target_audience.clone(),
            posting_style: user.posting_style,
            social_accounts: SocialConnections {
                facebook: user.social_accounts.facebook.connected,
                linkedin: user.social_accounts.linkedin.connected,
            },
            preferences: (&user.preferences).into(),
            profile_completeness: user.profile_completeness,
            is_onboarded: user.is_onboarded,
            created_at: user.created_at,
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub niche: Option<String>,
    pub target_audience: Option<String>,
    pub posting_style: Option<PostingStyle>,
    pub preferences: Option<UpdatePreferencesRequest>,
}

/// Partial preferences update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub auto_posting_enabled: Option<bool>,
    pub posting_frequency: Option<postpilot_core::domain::PostingFrequency>,
    pub best_time_to_post: Option<String>,
    pub include_hashtags: Option<bool>,
    pub include_trending_topics: Option<bool>,
    pub max_hashtags: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub niche: String,
    pub target_audience: String,
    pub posting_style: PostingStyle,
    #[serde(default)]
    pub niches: Option<Vec<NicheDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectSocialRequest {
    pub platform: String,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    pub access_token: String,
}

// ---- posts ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub trending_topics: Vec<String>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub status: PostStatus,
    pub generated_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub posted_at: Option<DateTime<Utc>>,
    pub social_media_ids: SocialMediaIdsDto,
    pub engagement: EngagementDto,
    pub ai_metadata: AiMetadataDto,
    pub edited_caption: Option<String>,
    pub edited_hashtags: Option<Vec<String>>,
    pub approval_notes: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialMediaIdsDto {
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementDto {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMetadataDto {
    pub generation_model: String,
    pub trending_topic_sources: Vec<String>,
    pub confidence_score: f64,
    pub user_niche: Option<String>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            caption: post.caption.clone(),
            hashtags: post.hashtags.clone(),
            trending_topics: post.trending_topics.clone(),
            image_path: post.image_path.clone(),
            image_url: post.image_url.clone(),
            status: post.status,
            generated_at: post.generated_at,
            approved_at: post.approved_at,
            posted_at: post.posted_at,
            social_media_ids: SocialMediaIdsDto {
                facebook: post.social_media_ids.facebook.clone(),
                linkedin: post.social_media_ids.linkedin.clone(),
            },
            engagement: EngagementDto {
                likes: post.engagement.likes,
                comments: post.engagement.comments,
                shares: post.engagement.shares,
                views: post.engagement.views,
            },
            ai_metadata: AiMetadataDto {
                generation_model: post.ai_metadata.generation_model.clone(),
                trending_topic_sources: post.ai_metadata.trending_topic_sources.clone(),
                confidence_score: post.ai_metadata.confidence_score,
                user_niche: post.ai_metadata.user_niche.clone(),
            },
            edited_caption: post.edited_caption.clone(),
            edited_hashtags: post.edited_hashtags.clone(),
            approval_notes: post.approval_notes.clone(),
            failure_reason: post.failure_reason.clone(),
            created_at: post.created_at,
        }
    }
}

/// Paged listing of a user's posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
}

/// Partial edit of a draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub caption: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub approval_notes: Option<String>,
}

/// One platform's publish result as returned by the approve endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResultDto {
    pub platform: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&PublishOutcome> for PublishResultDto {
    fn from(outcome: &PublishOutcome) -> Self {
        Self {
            platform: outcome.platform.as_str().to_string(),
            success: outcome.success,
            post_id: outcome.post_id.clone(),
            url: outcome.url.clone(),
            error: outcome.error.clone(),
        }
    }
}

/// Approve-and-publish result: the final post plus per-platform outcomes.
/// Partial failures still return 200; the post's own status says what stuck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
    pub post: PostResponse,
    pub social_results: Vec<PublishResultDto>,
}

// ---- analytics ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventDto {
    pub id: Uuid,
    pub post_id: Option<Uuid>,
    pub event_type: String,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl From<&AnalyticsEvent> for AnalyticsEventDto {
    fn from(event: &AnalyticsEvent) -> Self {
        Self {
            id: event.id,
            post_id: event.post_id,
            event_type: event.event_type.as_str().to_string(),
            data: serde_json::to_value(&event.data).unwrap_or_default(),
            timestamp: event.timestamp,
        }
    }
}

// ---- images ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDto {
    pub filename: String,
    pub url: String,
}

impl From<&ImageAsset> for ImageDto {
    fn from(asset: &ImageAsset) -> Self {
        Self {
            filename: asset.filename.clone(),
            url: asset.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageListResponse {
    pub images: Vec<ImageDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadataDto {
    pub filename: String,
    pub size_bytes: u64,
    pub format: String,
}

impl From<&ImageMetadata> for ImageMetadataDto {
    fn from(metadata: &ImageMetadata) -> Self {
        Self {
            filename: metadata.filename.clone(),
            size_bytes: metadata.size_bytes,
            format: metadata.format.clone(),
        }
    }
}
