use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::Post;

/// Append-only analytics event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub event_type: AnalyticsEventType,
    pub data: AnalyticsData,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(user_id: Uuid, post_id: Option<Uuid>, event_type: AnalyticsEventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            event_type,
            data: AnalyticsData::default(),
            timestamp: Utc::now(),
        }
    }

    /// Event recorded when the draft assembler persists a new post.
    pub fn post_generated(user_id: Uuid, post: &Post) -> Self {
        let mut event = Self::new(user_id, Some(post.id), AnalyticsEventType::PostGenerated);
        event.data.caption = Some(post.caption.clone());
        event.data.hashtags = post.hashtags.clone();
        event.data.trending_topics = post.trending_topics.clone();
        event
    }

    /// Event recorded after a publish fan-out completes.
    pub fn post_posted(user_id: Uuid, post: &Post) -> Self {
        let mut event = Self::new(user_id, Some(post.id), AnalyticsEventType::PostPosted);
        event.data.caption = Some(post.caption.clone());
        event.data.hashtags = post.hashtags.clone();
        event.data.platform = Some("both".to_string());
        event
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    PostGenerated,
    PostApproved,
    PostPosted,
    PostFailed,
    EngagementTracked,
}

impl AnalyticsEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostGenerated => "post_generated",
            Self::PostApproved => "post_approved",
            Self::PostPosted => "post_posted",
            Self::PostFailed => "post_failed",
            Self::EngagementTracked => "engagement_tracked",
        }
    }
}

impl std::str::FromStr for AnalyticsEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post_generated" => Ok(Self::PostGenerated),
            "post_approved" => Ok(Self::PostApproved),
            "post_posted" => Ok(Self::PostPosted),
            "post_failed" => Ok(Self::PostFailed),
            "engagement_tracked" => Ok(Self::EngagementTracked),
            other => Err(format!("unknown analytics event type: {other}")),
        }
    }
}

/// Event payload; fields are populated per event type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trending_topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}
