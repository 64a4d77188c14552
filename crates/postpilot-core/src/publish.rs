//! Publisher and post lifecycle - fan-out delivery to configured platforms
//! and the draft → posted/failed transition.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AnalyticsEvent, Post, PostStatus, PublishOutcome, SocialAccounts};
use crate::error::DomainError;
use crate::ports::{
    AnalyticsRepository, PlatformClient, PostRepository, PublishContent, UserRepository,
};

/// Sequential fan-out over the registered platform clients.
///
/// Platforms without complete credentials are skipped, not failed. One
/// platform's failure never prevents attempting the others; the result list
/// covers exactly the attempted platforms.
pub struct Publisher {
    clients: Vec<Arc<dyn PlatformClient>>,
}

impl Publisher {
    pub fn new(clients: Vec<Arc<dyn PlatformClient>>) -> Self {
        Self { clients }
    }

    pub async fn publish_all(
        &self,
        accounts: &SocialAccounts,
        content: &PublishContent,
    ) -> Vec<PublishOutcome> {
        let mut outcomes = Vec::new();

        for client in &self.clients {
            let platform = client.platform();
            let Some(credentials) = accounts.credentials_for(platform) else {
                tracing::debug!(platform = %platform, "platform not configured, skipping");
                continue;
            };

            match client.publish(&credentials, content).await {
                Ok(published) => {
                    tracing::info!(
                        platform = %platform,
                        external_id = %published.post_id,
                        "published"
                    );
                    outcomes.push(PublishOutcome::success(
                        platform,
                        published.post_id,
                        published.url,
                    ));
                }
                Err(err) => {
                    tracing::warn!(platform = %platform, error = %err, "publish failed");
                    outcomes.push(PublishOutcome::failure(platform, err.to_string()));
                }
            }
        }

        outcomes
    }
}

/// Approve-and-publish: owns the draft check, caption formatting, fan-out and
/// final status persistence.
pub struct PublishService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    publisher: Publisher,
}

impl PublishService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        publisher: Publisher,
    ) -> Self {
        Self {
            users,
            posts,
            analytics,
            publisher,
        }
    }

    /// Publish an owned draft to every configured platform and persist the
    /// aggregated outcome. Per-platform failures are reflected in the post's
    /// status and the returned outcome list, never raised as errors.
    pub async fn approve_and_publish(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<(Post, Vec<PublishOutcome>), DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            })?;
        post.ensure_owned_by(user_id)?;

        if post.status != PostStatus::Draft {
            return Err(DomainError::StateConflict(
                "only draft posts can be approved".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "user",
                id: user_id,
            })?;

        let content = PublishContent {
            caption: post.formatted_caption(),
            image_url: post.image_url.clone(),
        };
        let outcomes = self
            .publisher
            .publish_all(&user.social_accounts, &content)
            .await;

        post.record_publish_outcomes(&outcomes);
        let post = self.posts.save(post).await?;

        let event = AnalyticsEvent::post_posted(user_id, &post);
        if let Err(err) = self.analytics.append(event).await {
            tracing::warn!(user_id = %user_id, error = %err, "failed to record post_posted event");
        }

        tracing::info!(
            user_id = %user_id,
            post_id = %post.id,
            status = %post.status,
            attempted = outcomes.len(),
            "publish fan-out finished"
        );
        Ok((post, outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Platform;
    use crate::test_support::{
        FakePlatform, InMemoryAnalytics, InMemoryPosts, InMemoryUsers, sample_draft, sample_user,
    };

    fn service(
        users: Arc<InMemoryUsers>,
        posts: Arc<InMemoryPosts>,
        clients: Vec<Arc<dyn PlatformClient>>,
    ) -> PublishService {
        PublishService::new(
            users,
            posts,
            Arc::new(InMemoryAnalytics::default()),
            Publisher::new(clients),
        )
    }

    fn connect(user: &mut crate::domain::User, platform: Platform) {
        let account = match platform {
            Platform::Facebook => &mut user.social_accounts.facebook,
            Platform::Linkedin => &mut user.social_accounts.linkedin,
        };
        account.account_id = Some(format!("{platform}-acct"));
        account.access_token = Some("token".to_string());
        account.connected = true;
    }

    #[tokio::test]
    async fn only_configured_platforms_are_attempted() {
        let mut user = sample_user("tech", &[]);
        connect(&mut user, Platform::Facebook);
        let post = sample_draft(user.id);
        let (user_id, post_id) = (user.id, post.id);

        let posts = Arc::new(InMemoryPosts::with(vec![post]));
        let svc = service(
            Arc::new(InMemoryUsers::with(vec![user])),
            posts,
            vec![
                Arc::new(FakePlatform::succeeding(Platform::Facebook, "fb-9")),
                Arc::new(FakePlatform::succeeding(Platform::Linkedin, "li-9")),
            ],
        );

        let (post, outcomes) = svc.approve_and_publish(user_id, post_id).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].platform, Platform::Facebook);
        assert!(outcomes[0].success);
        assert_eq!(post.status, PostStatus::Posted);
        assert_eq!(post.social_media_ids.facebook.as_deref(), Some("fb-9"));
        assert!(post.social_media_ids.linkedin.is_none());
    }

    #[tokio::test]
    async fn partial_failure_yields_failed_post_with_successful_ids_kept() {
        let mut user = sample_user("tech", &[]);
        connect(&mut user, Platform::Facebook);
        connect(&mut user, Platform::Linkedin);
        let post = sample_draft(user.id);
        let (user_id, post_id) = (user.id, post.id);

        let posts = Arc::new(InMemoryPosts::with(vec![post]));
        let svc = service(
            Arc::new(InMemoryUsers::with(vec![user])),
            posts.clone(),
            vec![
                Arc::new(FakePlatform::succeeding(Platform::Facebook, "fb-1")),
                Arc::new(FakePlatform::failing(Platform::Linkedin, "token expired")),
            ],
        );

        let (post, outcomes) = svc.approve_and_publish(user_id, post_id).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(post.status, PostStatus::Failed);
        assert_eq!(
            post.failure_reason.as_deref(),
            Some("platform rejected the post: token expired")
        );
        assert_eq!(post.social_media_ids.facebook.as_deref(), Some("fb-1"));
        assert!(post.social_media_ids.linkedin.is_none());

        // the persisted copy carries the final state
        let stored = posts.get(post_id).unwrap();
        assert_eq!(stored.status, PostStatus::Failed);
    }

    #[tokio::test]
    async fn single_platform_failure_reported_without_error() {
        let mut user = sample_user("tech", &[]);
        connect(&mut user, Platform::Linkedin);
        let post = sample_draft(user.id);
        let (user_id, post_id) = (user.id, post.id);

        let posts = Arc::new(InMemoryPosts::with(vec![post]));
        let svc = service(
            Arc::new(InMemoryUsers::with(vec![user])),
            posts,
            vec![Arc::new(FakePlatform::failing(
                Platform::Linkedin,
                "boom",
            ))],
        );

        let (post, outcomes) = svc.approve_and_publish(user_id, post_id).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].platform, Platform::Linkedin);
        assert!(!outcomes[0].success);
        assert_eq!(post.status, PostStatus::Failed);
        assert!(post.social_media_ids.linkedin.is_none());
    }

    #[tokio::test]
    async fn non_draft_post_is_a_state_conflict() {
        let mut user = sample_user("tech", &[]);
        connect(&mut user, Platform::Facebook);
        let mut post = sample_draft(user.id);
        post.status = PostStatus::Posted;
        let (user_id, post_id) = (user.id, post.id);

        let svc = service(
            Arc::new(InMemoryUsers::with(vec![user])),
            Arc::new(InMemoryPosts::with(vec![post])),
            vec![Arc::new(FakePlatform::succeeding(Platform::Facebook, "x"))],
        );

        let err = svc.approve_and_publish(user_id, post_id).await.unwrap_err();
        assert!(matches!(err, DomainError::StateConflict(_)));
    }

    #[tokio::test]
    async fn foreign_post_is_unauthorized() {
        let mut owner = sample_user("tech", &[]);
        connect(&mut owner, Platform::Facebook);
        let intruder = sample_user("tech", &[]);
        let post = sample_draft(owner.id);
        let (intruder_id, post_id) = (intruder.id, post.id);

        let svc = service(
            Arc::new(InMemoryUsers::with(vec![owner, intruder])),
            Arc::new(InMemoryPosts::with(vec![post])),
            vec![Arc::new(FakePlatform::succeeding(Platform::Facebook, "x"))],
        );

        let err = svc
            .approve_and_publish(intruder_id, post_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn caption_sent_to_platforms_includes_hashtags() {
        let mut user = sample_user("tech", &[]);
        connect(&mut user, Platform::Facebook);
        let post = sample_draft(user.id);
        let (user_id, post_id) = (user.id, post.id);

        let fb = Arc::new(FakePlatform::succeeding(Platform::Facebook, "fb-1"));
        let svc = service(
            Arc::new(InMemoryUsers::with(vec![user])),
            Arc::new(InMemoryPosts::with(vec![post])),
            vec![fb.clone() as Arc<dyn PlatformClient>],
        );

        svc.approve_and_publish(user_id, post_id).await.unwrap();

        let sent = fb.last_caption().unwrap();
        assert!(sent.contains("\n\n#rust #backend"));
    }
}
