//! Analytics event entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use postpilot_core::domain::{AnalyticsData, AnalyticsEvent, AnalyticsEventType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "analytics_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub event_type: String,
    pub data: AnalyticsDataJson,
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct AnalyticsDataJson(pub AnalyticsData);

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

impl From<Model> for AnalyticsEvent {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            post_id: model.post_id,
            event_type: model
                .event_type
                .parse()
                .unwrap_or(AnalyticsEventType::EngagementTracked),
            data: model.data.0,
            timestamp: model.timestamp.into(),
        }
    }
}

impl From<AnalyticsEvent> for ActiveModel {
    fn from(event: AnalyticsEvent) -> Self {
        Self {
            id: Set(event.id),
            user_id: Set(event.user_id),
            post_id: Set(event.post_id),
            event_type: Set(event.event_type.as_str().to_string()),
            data: Set(AnalyticsDataJson(event.data)),
            timestamp: Set(event.timestamp.into()),
        }
    }
}
