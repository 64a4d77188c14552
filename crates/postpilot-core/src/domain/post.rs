use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a generated social-media post moving through the
/// draft → posted/failed lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
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
    pub social_media_ids: SocialMediaIds,
    pub engagement: Engagement,
    pub ai_metadata: AiMetadata,
    /// Owner edits override the generated caption/hashtags once set.
    pub edited_caption: Option<String>,
    pub edited_hashtags: Option<Vec<String>>,
    pub approval_notes: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post in draft status from pipeline output.
    pub fn draft(user_id: Uuid, content: DraftContent, ai_metadata: AiMetadata) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            caption: content.caption,
            hashtags: content.hashtags,
            trending_topics: content.trending_topics,
            image_path: content.image_path,
            image_url: content.image_url,
            status: PostStatus::Draft,
            generated_at: now,
            approved_at: None,
            posted_at: None,
            social_media_ids: SocialMediaIds::default(),
            engagement: Engagement::default(),
            ai_metadata,
            edited_caption: None,
            edited_hashtags: None,
            approval_notes: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The caption that will be displayed and published.
    pub fn effective_caption(&self) -> &str {
        self.edited_caption.as_deref().unwrap_or(&self.caption)
    }

    /// The hashtags that will be displayed and published.
    pub fn effective_hashtags(&self) -> &[String] {
        self.edited_hashtags.as_deref().unwrap_or(&self.hashtags)
    }

    /// Caption with hashtags appended, as sent to the platforms.
    pub fn formatted_caption(&self) -> String {
        let hashtags = self.effective_hashtags();
        if hashtags.is_empty() {
            self.effective_caption().to_string()
        } else {
            format!("{}\n\n{}", self.effective_caption(), hashtags.join(" "))
        }
    }

    pub fn ensure_owned_by(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }

    /// Apply owner edits. Only drafts are mutable.
    pub fn apply_edit(&mut self, edit: DraftEdit) -> Result<(), DomainError> {
        if self.status != PostStatus::Draft {
            return Err(DomainError::StateConflict(
                "only draft posts can be edited".to_string(),
            ));
        }

        if let Some(caption) = edit.caption {
            self.edited_caption = Some(caption);
        }
        if let Some(hashtags) = edit.hashtags {
            self.edited_hashtags = Some(hashtags);
        }
        if let Some(notes) = edit.approval_notes {
            self.approval_notes = Some(notes);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        if self.status == PostStatus::Draft {
            Ok(())
        } else {
            Err(DomainError::StateConflict(
                "only draft posts can be deleted".to_string(),
            ))
        }
    }

    /// Apply the aggregated publish outcome: posted when every attempted
    /// platform succeeded, failed when any attempt failed (keeping the first
    /// failure's message). Successful external ids are recorded either way.
    pub fn record_publish_outcomes(&mut self, outcomes: &[PublishOutcome]) {
        let now = Utc::now();
        self.approved_at = Some(now);
        self.posted_at = Some(now);
        self.status = PostStatus::Posted;

        for outcome in outcomes {
            if outcome.success {
                if let Some(post_id) = &outcome.post_id {
                    self.social_media_ids.set(outcome.platform, post_id.clone());
                }
            } else if self.status != PostStatus::Failed {
                self.status = PostStatus::Failed;
                self.failure_reason = outcome.error.clone();
            }
        }
        self.updated_at = now;
    }
}

/// Lifecycle status. Draft is the only status permitting edit/approve/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Approved,
    Posted,
    Failed,
    Scheduled,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Failed => "failed",
            Self::Scheduled => "scheduled",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "approved" => Ok(Self::Approved),
            "posted" => Ok(Self::Posted),
            "failed" => Ok(Self::Failed),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target platform for publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Linkedin => "linkedin",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External post ids per platform, filled in as publishes succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaIds {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl SocialMediaIds {
    pub fn set(&mut self, platform: Platform, id: String) {
        match platform {
            Platform::Facebook => self.facebook = Some(id),
            Platform::Linkedin => self.linkedin = Some(id),
        }
    }

    pub fn get(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Facebook => self.facebook.as_deref(),
            Platform::Linkedin => self.linkedin.as_deref(),
        }
    }
}

/// Engagement counters, updated by the metrics-sync collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub views: u64,
}

/// Generation provenance captured when the draft is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMetadata {
    pub generation_model: String,
    pub trending_topic_sources: Vec<String>,
    pub confidence_score: f64,
    pub user_niche: Option<String>,
}

/// Pipeline output used to assemble a draft.
#[derive(Debug, Clone)]
pub struct DraftContent {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub trending_topics: Vec<String>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
}

/// Owner edits to a draft.
#[derive(Debug, Clone, Default)]
pub struct DraftEdit {
    pub caption: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub approval_notes: Option<String>,
}

/// One attempted platform's publish result.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub platform: Platform,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublishOutcome {
    pub fn success(platform: Platform, post_id: String, url: String) -> Self {
        Self {
            platform,
            success: true,
            post_id: Some(post_id),
            url: Some(url),
            error: None,
        }
    }

    pub fn failure(platform: Platform, error: String) -> Self {
        Self {
            platform,
            success: false,
            post_id: None,
            url: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Post {
        Post::draft(
            Uuid::new_v4(),
            DraftContent {
                caption: "Shipping season".to_string(),
                hashtags: vec!["#rust".to_string(), "#backend".to_string()],
                trending_topics: vec!["AI and Machine Learning".to_string()],
                image_path: None,
                image_url: None,
            },
            AiMetadata {
                generation_model: "gpt-3.5-turbo".to_string(),
                trending_topic_sources: vec!["AI and Machine Learning".to_string()],
                confidence_score: 0.8,
                user_niche: Some("tech".to_string()),
            },
        )
    }

    #[test]
    fn new_post_starts_as_draft() {
        let post = draft();
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.approved_at.is_none());
        assert!(post.posted_at.is_none());
    }

    #[test]
    fn edit_keeps_draft_status_and_sets_overrides() {
        let mut post = draft();
        post.apply_edit(DraftEdit {
            caption: Some("Better caption".to_string()),
            hashtags: Some(vec!["#better".to_string()]),
            approval_notes: None,
        })
        .unwrap();

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.effective_caption(), "Better caption");
        assert_eq!(post.effective_hashtags(), ["#better".to_string()]);
        // originals are preserved
        assert_eq!(post.caption, "Shipping season");
    }

    #[test]
    fn edit_rejected_once_posted() {
        let mut post = draft();
        post.record_publish_outcomes(&[PublishOutcome::success(
            Platform::Facebook,
            "fb-1".to_string(),
            "https://facebook.com/fb-1".to_string(),
        )]);

        let err = post.apply_edit(DraftEdit::default()).unwrap_err();
        assert!(matches!(err, DomainError::StateConflict(_)));
        assert!(post.ensure_deletable().is_err());
    }

    #[test]
    fn all_successes_mark_posted_with_ids() {
        let mut post = draft();
        post.record_publish_outcomes(&[
            PublishOutcome::success(Platform::Facebook, "fb-1".into(), "u1".into()),
            PublishOutcome::success(Platform::Linkedin, "li-1".into(), "u2".into()),
        ]);

        assert_eq!(post.status, PostStatus::Posted);
        assert_eq!(post.social_media_ids.facebook.as_deref(), Some("fb-1"));
        assert_eq!(post.social_media_ids.linkedin.as_deref(), Some("li-1"));
        assert!(post.approved_at.is_some());
        assert!(post.posted_at.is_some());
        assert!(post.failure_reason.is_none());
    }

    #[test]
    fn partial_failure_marks_failed_but_keeps_successful_ids() {
        let mut post = draft();
        post.record_publish_outcomes(&[
            PublishOutcome::success(Platform::Facebook, "fb-1".into(), "u1".into()),
            PublishOutcome::failure(Platform::Linkedin, "token expired".into()),
        ]);

        assert_eq!(post.status, PostStatus::Failed);
        assert_eq!(post.failure_reason.as_deref(), Some("token expired"));
        assert_eq!(post.social_media_ids.facebook.as_deref(), Some("fb-1"));
        assert!(post.social_media_ids.linkedin.is_none());
    }

    #[test]
    fn failure_reason_is_first_failure() {
        let mut post = draft();
        post.record_publish_outcomes(&[
            PublishOutcome::failure(Platform::Facebook, "first".into()),
            PublishOutcome::failure(Platform::Linkedin, "second".into()),
        ]);

        assert_eq!(post.status, PostStatus::Failed);
        assert_eq!(post.failure_reason.as_deref(), Some("first"));
    }

    #[test]
    fn formatted_caption_appends_hashtags() {
        let post = draft();
        assert_eq!(
            post.formatted_caption(),
            "Shipping season\n\n#rust #backend"
        );
    }

    #[test]
    fn formatted_caption_without_hashtags_has_no_suffix() {
        let mut post = draft();
        post.hashtags.clear();
        assert_eq!(post.formatted_caption(), "Shipping season");
    }

    #[test]
    fn ownership_check() {
        let post = draft();
        assert!(post.ensure_owned_by(post.user_id).is_ok());
        assert!(matches!(
            post.ensure_owned_by(Uuid::new_v4()),
            Err(DomainError::Unauthorized)
        ));
    }
}
