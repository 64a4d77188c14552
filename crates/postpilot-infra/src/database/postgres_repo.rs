//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    PaginatorTrait,
};
use uuid::Uuid;

use postpilot_core::domain::{AnalyticsEvent, Post, PostStatus, User};
use postpilot_core::error::RepoError;
use postpilot_core::ports::{AnalyticsRepository, PostQuery, PostRepository, UserRepository};

use super::entity::analytics::{self, Entity as AnalyticsEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = mask_email(email);
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_auto_posting_enabled(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::AutoPostingEnabled.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
        query: &PostQuery,
    ) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find().filter(post::Column::UserId.eq(user_id));
        if let Some(status) = query.status {
            select = select.filter(post::Column::Status.eq(status.as_str()));
        }

        let result = select
            .order_by_desc(post::Column::CreatedAt)
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<PostStatus>,
    ) -> Result<u64, RepoError> {
        let mut select = PostEntity::find().filter(post::Column::UserId.eq(user_id));
        if let Some(status) = status {
            select = select.filter(post::Column::Status.eq(status.as_str()));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}

/// PostgreSQL analytics event log.
pub struct PostgresAnalyticsRepository {
    db: DbConn,
}

impl PostgresAnalyticsRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalyticsRepository for PostgresAnalyticsRepository {
    async fn append(&self, event: AnalyticsEvent) -> Result<(), RepoError> {
        let active: analytics::ActiveModel = event.into();
        active
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(())
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<AnalyticsEvent>, RepoError> {
        let result = AnalyticsEntity::find()
            .filter(analytics::Column::UserId.eq(user_id))
            .order_by_desc(analytics::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn mask_email_keeps_first_char_and_domain() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("j@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
