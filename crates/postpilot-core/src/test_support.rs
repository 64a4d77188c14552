//! Hand-written port fakes shared by the pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AiMetadata, AnalyticsEvent, DraftContent, NicheProfile, PastPost, Platform,
    PlatformCredentials, Post, PostStatus, User,
};
use crate::error::{AssetError, GenerationError, PublishError, RepoError};
use crate::ports::{
    AnalyticsRepository, AssetStore, BaseRepository, CaptionGenerator, CaptionRequest,
    GeneratedCaption, ImageAsset, ImageMetadata, PlatformClient, PostQuery, PostRepository,
    PublishContent, PublishedPost, UserRepository,
};

pub fn sample_user(niche: &str, keywords: &[&str]) -> User {
    let mut user = User::new(
        format!("{}@example.com", Uuid::new_v4()),
        "hashed".to_string(),
        "Sample".to_string(),
    );
    user.niche = Some(niche.to_string());
    if !keywords.is_empty() {
        user.niches = vec![NicheProfile {
            name: niche.to_string(),
            description: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }];
    }
    user
}

pub fn sample_draft(user_id: Uuid) -> Post {
    Post::draft(
        user_id,
        DraftContent {
            caption: "Shipping season".to_string(),
            hashtags: vec!["#rust".to_string(), "#backend".to_string()],
            trending_topics: vec!["AI and Machine Learning".to_string()],
            image_path: None,
            image_url: None,
        },
        AiMetadata {
            generation_model: "stub-model".to_string(),
            trending_topic_sources: vec!["AI and Machine Learning".to_string()],
            confidence_score: 0.8,
            user_niche: Some("tech".to_string()),
        },
    )
}

#[derive(Default)]
pub struct InMemoryUsers {
    store: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            store: Mutex::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.store.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_auto_posting_enabled(&self) -> Result<Vec<User>, RepoError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.preferences.auto_posting_enabled)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    store: Mutex<HashMap<Uuid, Post>>,
}

impl InMemoryPosts {
    pub fn with(posts: Vec<Post>) -> Self {
        Self {
            store: Mutex::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    pub fn count(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Post> {
        self.store.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.store.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_user(
        &self,
        user_id: Uuid,
        query: &PostQuery,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .store
            .lock()
            .unwrap()
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
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.user_id == user_id)
            .filter(|p| status.is_none_or(|s| p.status == s))
            .count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl InMemoryAnalytics {
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryAnalytics {
    async fn append(&self, event: AnalyticsEvent) -> Result<(), RepoError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<AnalyticsEvent>, RepoError> {
        let mut events: Vec<AnalyticsEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(limit as usize);
        Ok(events)
    }
}

/// Caption generator stub returning a fixed caption or a fixed failure.
pub struct StubCaptions {
    caption: Option<String>,
}

impl StubCaptions {
    pub fn ok(caption: &str) -> Self {
        Self {
            caption: Some(caption.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { caption: None }
    }
}

#[async_trait]
impl CaptionGenerator for StubCaptions {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(
        &self,
        _request: &CaptionRequest,
    ) -> Result<GeneratedCaption, GenerationError> {
        match &self.caption {
            Some(caption) => Ok(GeneratedCaption {
                caption: caption.clone(),
                hashtags: vec!["#rust".to_string()],
                trending_topics: vec!["AI and Machine Learning".to_string()],
                confidence_score: 0.9,
            }),
            None => Err(GenerationError::Request("completion service down".into())),
        }
    }
}

/// Asset store stub over a fixed image list.
pub struct StaticAssets {
    images: Vec<ImageAsset>,
}

impl StaticAssets {
    pub fn empty() -> Self {
        Self { images: Vec::new() }
    }

    pub fn with_images(filenames: &[&str]) -> Self {
        Self {
            images: filenames
                .iter()
                .map(|name| ImageAsset {
                    filename: name.to_string(),
                    path: format!("uploads/images/{name}"),
                    url: format!("/uploads/images/{name}"),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl AssetStore for StaticAssets {
    async fn list_images(&self) -> Result<Vec<ImageAsset>, AssetError> {
        Ok(self.images.clone())
    }

    async fn store_image(&self, _filename: &str, _bytes: &[u8]) -> Result<ImageAsset, AssetError> {
        unimplemented!("not used by pipeline tests")
    }

    async fn delete_image(&self, _filename: &str) -> Result<(), AssetError> {
        unimplemented!("not used by pipeline tests")
    }

    async fn image_metadata(&self, filename: &str) -> Result<ImageMetadata, AssetError> {
        Err(AssetError::NotFound(filename.to_string()))
    }
}

/// Platform client fake recording the last caption it was asked to publish.
pub struct FakePlatform {
    platform: Platform,
    post_id: Option<String>,
    error: Option<String>,
    last_caption: Mutex<Option<String>>,
}

impl FakePlatform {
    pub fn succeeding(platform: Platform, post_id: &str) -> Self {
        Self {
            platform,
            post_id: Some(post_id.to_string()),
            error: None,
            last_caption: Mutex::new(None),
        }
    }

    pub fn failing(platform: Platform, error: &str) -> Self {
        Self {
            platform,
            post_id: None,
            error: Some(error.to_string()),
            last_caption: Mutex::new(None),
        }
    }

    pub fn last_caption(&self) -> Option<String> {
        self.last_caption.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformClient for FakePlatform {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(
        &self,
        _credentials: &PlatformCredentials,
        content: &PublishContent,
    ) -> Result<PublishedPost, PublishError> {
        *self.last_caption.lock().unwrap() = Some(content.caption.clone());
        match (&self.post_id, &self.error) {
            (Some(id), _) => Ok(PublishedPost {
                post_id: id.clone(),
                url: format!("https://example.com/{id}"),
            }),
            (None, Some(err)) => Err(PublishError::Api(err.clone())),
            (None, None) => unreachable!(),
        }
    }
}
