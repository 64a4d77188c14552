//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use postpilot_core::domain::{AiMetadata, Engagement, Post, PostStatus, SocialMediaIds};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    pub hashtags: StringListJson,
    pub trending_topics: StringListJson,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub generated_at: DateTimeWithTimeZone,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub posted_at: Option<DateTimeWithTimeZone>,
    pub social_media_ids: SocialMediaIdsJson,
    pub engagement: EngagementJson,
    pub ai_metadata: AiMetadataJson,
    #[sea_orm(column_type = "Text", nullable)]
    pub edited_caption: Option<String>,
    pub edited_hashtags: Option<StringListJson>,
    pub approval_notes: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringListJson(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct SocialMediaIdsJson(pub SocialMediaIds);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct EngagementJson(pub Engagement);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct AiMetadataJson(pub AiMetadata);

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            caption: model.caption,
            hashtags: model.hashtags.0,
            trending_topics: model.trending_topics.0,
            image_path: model.image_path,
            image_url: model.image_url,
            status: model.status.parse().unwrap_or(PostStatus::Draft),
            generated_at: model.generated_at.into(),
            approved_at: model.approved_at.map(Into::into),
            posted_at: model.posted_at.map(Into::into),
            social_media_ids: model.social_media_ids.0,
            engagement: model.engagement.0,
            ai_metadata: model.ai_metadata.0,
            edited_caption: model.edited_caption,
            edited_hashtags: model.edited_hashtags.map(|h| h.0),
            approval_notes: model.approval_notes,
            failure_reason: model.failure_reason,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.user_id),
            caption: Set(post.caption),
            hashtags: Set(StringListJson(post.hashtags)),
            trending_topics: Set(StringListJson(post.trending_topics)),
            image_path: Set(post.image_path),
            image_url: Set(post.image_url),
            status: Set(post.status.as_str().to_string()),
            generated_at: Set(post.generated_at.into()),
            approved_at: Set(post.approved_at.map(Into::into)),
            posted_at: Set(post.posted_at.map(Into::into)),
            social_media_ids: Set(SocialMediaIdsJson(post.social_media_ids)),
            engagement: Set(EngagementJson(post.engagement)),
            ai_metadata: Set(AiMetadataJson(post.ai_metadata)),
            edited_caption: Set(post.edited_caption),
            edited_hashtags: Set(post.edited_hashtags.map(StringListJson)),
            approval_notes: Set(post.approval_notes),
            failure_reason: Set(post.failure_reason),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
