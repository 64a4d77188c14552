use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AnalyticsEvent, Post, PostStatus, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Every user with auto-posting enabled; used to seed the scheduler at
    /// process start.
    async fn find_auto_posting_enabled(&self) -> Result<Vec<User>, RepoError>;
}

/// Listing parameters for a user's posts.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub limit: u64,
    pub skip: u64,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: 20,
            skip: 0,
        }
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// A user's posts, newest first, optionally filtered by status.
    async fn find_by_user(&self, user_id: Uuid, query: &PostQuery)
    -> Result<Vec<Post>, RepoError>;

    /// Total matching posts for the same filter, ignoring pagination.
    async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<PostStatus>,
    ) -> Result<u64, RepoError>;
}

/// Append-only analytics event log.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn append(&self, event: AnalyticsEvent) -> Result<(), RepoError>;

    /// A user's most recent events, newest first.
    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<AnalyticsEvent>, RepoError>;
}
