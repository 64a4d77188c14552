//! Domain entities - the core business objects.

mod analytics;

mod post;

mod user;

pub use analytics::{AnalyticsData, AnalyticsEvent, AnalyticsEventType};
pub use post::{
    AiMetadata, DraftContent, DraftEdit, Engagement, Platform, Post, PostStatus, PublishOutcome,
    SocialMediaIds,
};
pub use user::{
    EngagementAverages, NicheProfile, PastPost, PlatformCredentials, PostingFrequency,
    PostingStyle, Preferences, SocialAccount, SocialAccounts, User, average_engagement,
};
