//! Draft assembler - composes the trend source, caption generator and image
//! selector into a persisted draft post.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AiMetadata, AnalyticsEvent, DraftContent, Post, User};
use crate::error::DomainError;
use crate::ports::{
    AnalyticsRepository, AssetStore, CaptionGenerator, CaptionRequest, ImageAsset, PostRepository,
    UserRepository,
};
use crate::trending;

/// Orchestrates draft generation for one user.
///
/// Trend lookup, caption generation and persistence failures abort the whole
/// operation with nothing persisted; an empty image pool is non-fatal and the
/// draft proceeds without image fields.
pub struct DraftGenerator {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    captions: Arc<dyn CaptionGenerator>,
    assets: Arc<dyn AssetStore>,
}

impl DraftGenerator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        captions: Arc<dyn CaptionGenerator>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            users,
            posts,
            analytics,
            captions,
            assets,
        }
    }

    /// Generate and persist a draft for the given user.
    pub async fn generate_draft(&self, user_id: Uuid) -> Result<Post, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "user",
                id: user_id,
            })?;

        let post = self.assemble(&user).await?;
        let post = self.posts.save(post).await?;

        let event = AnalyticsEvent::post_generated(user.id, &post);
        if let Err(err) = self.analytics.append(event).await {
            tracing::warn!(user_id = %user.id, error = %err, "failed to record post_generated event");
        }

        tracing::info!(user_id = %user.id, post_id = %post.id, "draft generated");
        Ok(post)
    }

    async fn assemble(&self, user: &User) -> Result<Post, DomainError> {
        let niche = user.niche.clone().unwrap_or_else(|| "general".to_string());
        let topics = trending::trending_topics(&niche, &user.aggregated_keywords());

        let request = CaptionRequest {
            niche: niche.clone(),
            style: user.posting_style,
            target_audience: user
                .target_audience
                .clone()
                .unwrap_or_else(|| "general audience".to_string()),
            trending_topics: topics.clone(),
            image_description: None,
            past_engagement: user.past_posts.clone(),
        };
        let generated = self.captions.generate(&request).await?;

        let image = select_image(
            self.assets.as_ref(),
            &generated.caption,
            &generated.hashtags,
        )
        .await;

        let metadata = AiMetadata {
            generation_model: self.captions.model_name().to_string(),
            trending_topic_sources: topics,
            confidence_score: generated.confidence_score,
            user_niche: user.niche.clone(),
        };

        Ok(Post::draft(
            user.id,
            DraftContent {
                caption: generated.caption,
                hashtags: generated.hashtags,
                trending_topics: generated.trending_topics,
                image_path: image.as_ref().map(|i| i.path.clone()),
                image_url: image.as_ref().map(|i| i.url.clone()),
            },
            metadata,
        ))
    }
}

/// Deterministic pick from the available pool: the first image, or None when
/// the pool is empty or unreadable. The hashtag parameter is reserved for
/// future content matching.
pub async fn select_image(
    assets: &dyn AssetStore,
    _caption: &str,
    _hashtags: &[String],
) -> Option<ImageAsset> {
    match assets.list_images().await {
        Ok(images) => images.into_iter().next(),
        Err(err) => {
            tracing::warn!(error = %err, "image pool unavailable, continuing without image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PastPost, PostStatus};
    use crate::test_support::{
        InMemoryAnalytics, InMemoryPosts, InMemoryUsers, StaticAssets, StubCaptions, sample_user,
    };

    fn generator(
        users: Arc<InMemoryUsers>,
        posts: Arc<InMemoryPosts>,
        analytics: Arc<InMemoryAnalytics>,
        captions: StubCaptions,
        assets: StaticAssets,
    ) -> DraftGenerator {
        DraftGenerator::new(users, posts, analytics, Arc::new(captions), Arc::new(assets))
    }

    #[tokio::test]
    async fn generates_draft_with_provenance() {
        let mut user = sample_user("tech", &["rust"]);
        user.past_posts = vec![PastPost {
            likes: 10,
            comments: 2,
            shares: 1,
            ..Default::default()
        }];
        let user_id = user.id;

        let users = Arc::new(InMemoryUsers::with(vec![user]));
        let posts = Arc::new(InMemoryPosts::default());
        let analytics = Arc::new(InMemoryAnalytics::default());
        let g = generator(
            users,
            posts.clone(),
            analytics.clone(),
            StubCaptions::ok("Rust is eating the backend"),
            StaticAssets::with_images(&["sunrise.png"]),
        );

        let post = g.generate_draft(user_id).await.unwrap();

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.ai_metadata.user_niche.as_deref(), Some("tech"));
        assert_eq!(post.ai_metadata.generation_model, "stub-model");
        assert!(
            post.ai_metadata
                .trending_topic_sources
                .contains(&"rust trends".to_string())
        );
        assert_eq!(post.image_url.as_deref(), Some("/uploads/images/sunrise.png"));
        assert_eq!(posts.count(), 1);
        assert_eq!(analytics.count(), 1);
    }

    #[tokio::test]
    async fn generation_failure_persists_nothing() {
        let user = sample_user("tech", &[]);
        let user_id = user.id;

        let users = Arc::new(InMemoryUsers::with(vec![user]));
        let posts = Arc::new(InMemoryPosts::default());
        let analytics = Arc::new(InMemoryAnalytics::default());
        let g = generator(
            users,
            posts.clone(),
            analytics.clone(),
            StubCaptions::failing(),
            StaticAssets::with_images(&["sunrise.png"]),
        );

        let err = g.generate_draft(user_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Generation(_)));
        assert_eq!(posts.count(), 0);
        assert_eq!(analytics.count(), 0);
    }

    #[tokio::test]
    async fn empty_image_pool_is_non_fatal() {
        let user = sample_user("lifestyle", &[]);
        let user_id = user.id;

        let users = Arc::new(InMemoryUsers::with(vec![user]));
        let posts = Arc::new(InMemoryPosts::default());
        let analytics = Arc::new(InMemoryAnalytics::default());
        let g = generator(
            users,
            posts,
            analytics,
            StubCaptions::ok("Morning routines"),
            StaticAssets::empty(),
        );

        let post = g.generate_draft(user_id).await.unwrap();
        assert!(post.image_path.is_none());
        assert!(post.image_url.is_none());
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let users = Arc::new(InMemoryUsers::default());
        let posts = Arc::new(InMemoryPosts::default());
        let analytics = Arc::new(InMemoryAnalytics::default());
        let g = generator(
            users,
            posts,
            analytics,
            StubCaptions::ok("x"),
            StaticAssets::empty(),
        );

        let err = g.generate_draft(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
