//! User entity for SeaORM.
//!
//! Document-shaped fields (niches, social accounts, engagement history) are
//! stored as JSONB; auto-posting preferences are flattened into columns so
//! the scheduler's startup query stays a plain filter.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use postpilot_core::domain::{NicheProfile, PastPost, Preferences, SocialAccounts, User};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub niche: Option<String>,
    pub niches: NichesJson,
    pub target_audience: Option<String>,
    pub posting_style: String,
    pub social_accounts: SocialAccountsJson,
    pub auto_posting_enabled: bool,
    pub posting_frequency: String,
    pub best_time_to_post: String,
    pub include_hashtags: bool,
    pub include_trending_topics: bool,
    pub max_hashtags: i32,
    pub past_posts: PastPostsJson,
    pub profile_completeness: i16,
    pub is_onboarded: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct NichesJson(pub Vec<NicheProfile>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct SocialAccountsJson(pub SocialAccounts);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct PastPostsJson(pub Vec<PastPost>);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain User.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            niche: model.niche,
            niches: model.niches.0,
            target_audience: model.target_audience,
            posting_style: model.posting_style.parse().unwrap_or_default(),
            social_accounts: model.social_accounts.0,
            preferences: Preferences {
                auto_posting_enabled: model.auto_posting_enabled,
                posting_frequency: model.posting_frequency.parse().unwrap_or_default(),
                best_time_to_post: model.best_time_to_post,
                include_hashtags: model.include_hashtags,
                include_trending_topics: model.include_trending_topics,
                max_hashtags: model.max_hashtags.max(0) as u32,
            },
            past_posts: model.past_posts.0,
            profile_completeness: model.profile_completeness.clamp(0, 100) as u8,
            is_onboarded: model.is_onboarded,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain User to SeaORM ActiveModel.
impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            niche: Set(user.niche),
            niches: Set(NichesJson(user.niches)),
            target_audience: Set(user.target_audience),
            posting_style: Set(user.posting_style.as_str().to_string()),
            social_accounts: Set(SocialAccountsJson(user.social_accounts)),
            auto_posting_enabled: Set(user.preferences.auto_posting_enabled),
            posting_frequency: Set(user.preferences.posting_frequency.as_str().to_string()),
            best_time_to_post: Set(user.preferences.best_time_to_post),
            include_hashtags: Set(user.preferences.include_hashtags),
            include_trending_topics: Set(user.preferences.include_trending_topics),
            max_hashtags: Set(user.preferences.max_hashtags as i32),
            past_posts: Set(PastPostsJson(user.past_posts)),
            profile_completeness: Set(i16::from(user.profile_completeness)),
            is_onboarded: Set(user.is_onboarded),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
