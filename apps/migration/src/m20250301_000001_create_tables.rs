//! Initial schema: users, posts and the analytics event log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Niche).string().null())
                    .col(ColumnDef::new(Users::Niches).json_binary().not_null())
                    .col(ColumnDef::new(Users::TargetAudience).string().null())
                    .col(ColumnDef::new(Users::PostingStyle).string().not_null())
                    .col(
                        ColumnDef::new(Users::SocialAccounts)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::AutoPostingEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::PostingFrequency).string().not_null())
                    .col(ColumnDef::new(Users::BestTimeToPost).string().not_null())
                    .col(
                        ColumnDef::new(Users::IncludeHashtags)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::IncludeTrendingTopics)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::MaxHashtags)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(ColumnDef::new(Users::PastPosts).json_binary().not_null())
                    .col(
                        ColumnDef::new(Users::ProfileCompleteness)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::IsOnboarded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Caption).text().not_null())
                    .col(ColumnDef::new(Posts::Hashtags).json_binary().not_null())
                    .col(
                        ColumnDef::new(Posts::TrendingTopics)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Posts::ImagePath).string().null())
                    .col(ColumnDef::new(Posts::ImageUrl).string().null())
                    .col(ColumnDef::new(Posts::Status).string().not_null())
                    .col(
                        ColumnDef::new(Posts::GeneratedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Posts::PostedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Posts::SocialMediaIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Posts::Engagement).json_binary().not_null())
                    .col(ColumnDef::new(Posts::AiMetadata).json_binary().not_null())
                    .col(ColumnDef::new(Posts::EditedCaption).text().null())
                    .col(ColumnDef::new(Posts::EditedHashtags).json_binary().null())
                    .col(ColumnDef::new(Posts::ApprovalNotes).string().null())
                    .col(ColumnDef::new(Posts::FailureReason).string().null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_user_id")
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AnalyticsEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalyticsEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AnalyticsEvents::UserId).uuid().not_null())
                    .col(ColumnDef::new(AnalyticsEvents::PostId).uuid().null())
                    .col(
                        ColumnDef::new(AnalyticsEvents::EventType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Data)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_events_user_id")
                            .from(AnalyticsEvents::Table, AnalyticsEvents::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Query patterns: a user's posts by status, and newest-first listings.
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_user_status")
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .col(Posts::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_user_created")
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_analytics_user_type")
                    .table(AnalyticsEvents::Table)
                    .col(AnalyticsEvents::UserId)
                    .col(AnalyticsEvents::EventType)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_analytics_user_timestamp")
                    .table(AnalyticsEvents::Table)
                    .col(AnalyticsEvents::UserId)
                    .col(AnalyticsEvents::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnalyticsEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Niche,
    Niches,
    TargetAudience,
    PostingStyle,
    SocialAccounts,
    AutoPostingEnabled,
    PostingFrequency,
    BestTimeToPost,
    IncludeHashtags,
    IncludeTrendingTopics,
    MaxHashtags,
    PastPosts,
    ProfileCompleteness,
    IsOnboarded,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    UserId,
    Caption,
    Hashtags,
    TrendingTopics,
    ImagePath,
    ImageUrl,
    Status,
    GeneratedAt,
    ApprovedAt,
    PostedAt,
    SocialMediaIds,
    Engagement,
    AiMetadata,
    EditedCaption,
    EditedHashtags,
    ApprovalNotes,
    FailureReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AnalyticsEvents {
    Table,
    Id,
    UserId,
    PostId,
    EventType,
    Data,
    Timestamp,
}
