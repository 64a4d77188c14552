use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use postpilot_core::domain::{Post, PostStatus, User};
use postpilot_core::ports::{BaseRepository, UserRepository};

use super::entity::post::{
    self, AiMetadataJson, EngagementJson, SocialMediaIdsJson, StringListJson,
};
use super::entity::user::{self, NichesJson, PastPostsJson, SocialAccountsJson};
use super::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: Uuid, user_id: Uuid, status: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id,
        user_id,
        caption: "Hello world".to_owned(),
        hashtags: StringListJson(vec!["#hello".to_owned()]),
        trending_topics: StringListJson(vec!["Trending Now".to_owned()]),
        image_path: None,
        image_url: None,
        status: status.to_owned(),
        generated_at: now.into(),
        approved_at: None,
        posted_at: None,
        social_media_ids: SocialMediaIdsJson(Default::default()),
        engagement: EngagementJson(Default::default()),
        ai_metadata: AiMetadataJson(postpilot_core::domain::AiMetadata {
            generation_model: "gpt-3.5-turbo".to_owned(),
            trending_topic_sources: vec!["Trending Now".to_owned()],
            confidence_score: 0.8,
            user_niche: Some("tech".to_owned()),
        }),
        edited_caption: None,
        edited_hashtags: None,
        approval_notes: None,
        failure_reason: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn user_model(id: Uuid) -> user::Model {
    let now = chrono::Utc::now();
    user::Model {
        id,
        email: "jane@example.com".to_owned(),
        password_hash: "hash".to_owned(),
        name: "Jane".to_owned(),
        niche: Some("tech".to_owned()),
        niches: NichesJson(Vec::new()),
        target_audience: Some("developers".to_owned()),
        posting_style: "casual".to_owned(),
        social_accounts: SocialAccountsJson(Default::default()),
        auto_posting_enabled: true,
        posting_frequency: "daily".to_owned(),
        best_time_to_post: "08:30".to_owned(),
        include_hashtags: true,
        include_trending_topics: true,
        max_hashtags: 10,
        past_posts: PastPostsJson(Vec::new()),
        profile_completeness: 67,
        is_onboarded: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_converts_to_domain() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, user_id, "draft")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.hashtags, vec!["#hello".to_owned()]);
    assert_eq!(post.ai_metadata.user_niche.as_deref(), Some("tech"));
}

#[tokio::test]
async fn find_user_by_email_rebuilds_preferences() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(user_id)]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user: User = repo
        .find_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.id, user_id);
    assert!(user.preferences.auto_posting_enabled);
    assert_eq!(user.preferences.best_time_to_post, "08:30");
    assert_eq!(
        user.posting_style,
        postpilot_core::domain::PostingStyle::Casual
    );
}
