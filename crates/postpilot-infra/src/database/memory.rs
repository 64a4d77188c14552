//! In-memory repository implementations.
//!
//! Fallback when `DATABASE_URL` is not configured, and the backing store for
//! scheduler and pipeline tests. Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use postpilot_core::domain::{AnalyticsEvent, Post, PostStatus, User};
use postpilot_core::error::RepoError;
use postpilot_core::ports::{
    AnalyticsRepository, BaseRepository, PostQuery, PostRepository, UserRepository,
};

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.store.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_auto_posting_enabled(&self) -> Result<Vec<User>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .filter(|u| u.preferences.auto_posting_enabled)
            .cloned()
            .collect())
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.store.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
        query: &PostQuery,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .store
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .filter(|p| query.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<PostStatus>,
    ) -> Result<u64, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .filter(|p| status.is_none_or(|s| p.status == s))
            .count() as u64)
    }
}

/// In-memory append-only analytics log.
#[derive(Default)]
pub struct InMemoryAnalyticsRepository {
    events: Arc<RwLock<Vec<AnalyticsEvent>>>,
}

impl InMemoryAnalyticsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryAnalyticsRepository {
    async fn append(&self, event: AnalyticsEvent) -> Result<(), RepoError> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<AnalyticsEvent>, RepoError> {
        let mut events: Vec<AnalyticsEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(limit as usize);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postpilot_core::domain::{AiMetadata, DraftContent};

    fn draft(user_id: Uuid) -> Post {
        Post::draft(
            user_id,
            DraftContent {
                caption: "c".into(),
                hashtags: Vec::new(),
                trending_topics: Vec::new(),
                image_path: None,
                image_url: None,
            },
            AiMetadata {
                generation_model: "m".into(),
                trending_topic_sources: Vec::new(),
                confidence_score: 0.8,
                user_niche: None,
            },
        )
    }

    #[tokio::test]
    async fn user_round_trip_and_email_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("a@b.com".into(), "hash".into(), "A".into());
        let id = user.id;

        repo.save(user).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_some());
        assert!(repo.find_by_email("a@b.com").await.unwrap().is_some());
        assert!(repo.find_by_email("other@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn auto_posting_filter() {
        let repo = InMemoryUserRepository::new();
        let mut enabled = User::new("on@b.com".into(), "h".into(), "On".into());
        enabled.preferences.auto_posting_enabled = true;
        let disabled = User::new("off@b.com".into(), "h".into(), "Off".into());

        repo.save(enabled).await.unwrap();
        repo.save(disabled).await.unwrap();

        let users = repo.find_auto_posting_enabled().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "on@b.com");
    }

    #[tokio::test]
    async fn post_listing_filters_by_status_and_paginates() {
        let repo = InMemoryPostRepository::new();
        let user_id = Uuid::new_v4();

        for _ in 0..3 {
            repo.save(draft(user_id)).await.unwrap();
        }
        let mut posted = draft(user_id);
        posted.status = PostStatus::Posted;
        repo.save(posted).await.unwrap();

        let drafts = repo
            .find_by_user(
                user_id,
                &PostQuery {
                    status: Some(PostStatus::Draft),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(drafts.len(), 3);

        let page = repo
            .find_by_user(
                user_id,
                &PostQuery {
                    status: None,
                    limit: 2,
                    skip: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 2);

        assert_eq!(repo.count_by_user(user_id, None).await.unwrap(), 4);
        assert_eq!(
            repo.count_by_user(user_id, Some(PostStatus::Posted))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
