//! Application state - shared across all handlers.

use std::sync::Arc;

use postpilot_core::generator::DraftGenerator;
use postpilot_core::ports::{
    AnalyticsRepository, AssetStore, PasswordService, PlatformClient, PostRepository, RateLimiter,
    TokenService, UserRepository,
};
use postpilot_core::publish::{PublishService, Publisher};
use postpilot_infra::assets::FsAssetStore;
use postpilot_infra::auth::{Argon2PasswordService, JwtTokenService};
use postpilot_infra::completion::OpenAiCaptionGenerator;
use postpilot_infra::database::{
    InMemoryAnalyticsRepository, InMemoryPostRepository, InMemoryUserRepository,
};
use postpilot_infra::rate_limit::GenerationRateLimiter;
use postpilot_infra::social::{FacebookClient, FacebookConfig, LinkedinClient, LinkedinConfig};

use crate::background::PostingScheduler;
use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub assets: Arc<dyn AssetStore>,
    pub generator: Arc<DraftGenerator>,
    pub publish: Arc<PublishService>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    pub scheduler: Arc<PostingScheduler>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(
        config: &AppConfig,
    ) -> Result<Self, tokio_cron_scheduler::JobSchedulerError> {
        let (users, posts, analytics) = Self::build_repositories(config).await;

        let assets: Arc<dyn AssetStore> = Arc::new(FsAssetStore::new(config.assets.clone()));
        let captions = Arc::new(OpenAiCaptionGenerator::new(config.openai.clone()));

        let generator = Arc::new(DraftGenerator::new(
            users.clone(),
            posts.clone(),
            analytics.clone(),
            captions,
            assets.clone(),
        ));

        let clients: Vec<Arc<dyn PlatformClient>> = vec![
            Arc::new(FacebookClient::new(FacebookConfig::default())),
            Arc::new(LinkedinClient::new(LinkedinConfig::default())),
        ];
        let publish = Arc::new(PublishService::new(
            users.clone(),
            posts.clone(),
            analytics.clone(),
            Publisher::new(clients),
        ));

        let rate_limiter: Option<Arc<dyn RateLimiter>> =
            match GenerationRateLimiter::new(config.rate_limit.clone()) {
                Ok(limiter) => Some(Arc::new(limiter)),
                Err(e) => {
                    tracing::warn!(error = %e, "rate limiter unavailable, generation is unlimited");
                    None
                }
            };

        let scheduler = Arc::new(PostingScheduler::new(users.clone(), generator.clone()).await?);

        tracing::info!("Application state initialized");

        Ok(Self {
            users,
            posts,
            analytics,
            assets,
            generator,
            publish,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            rate_limiter,
            scheduler,
        })
    }

    async fn build_repositories(
        config: &AppConfig,
    ) -> (
        Arc<dyn UserRepository>,
        Arc<dyn PostRepository>,
        Arc<dyn AnalyticsRepository>,
    ) {
        if let Some(db_config) = &config.database {
            match postpilot_infra::database::connect(db_config).await {
                Ok(conn) => {
                    return (
                        Arc::new(postpilot_infra::database::PostgresUserRepository::new(
                            conn.clone(),
                        )),
                        Arc::new(postpilot_infra::database::PostgresPostRepository::new(
                            conn.clone(),
                        )),
                        Arc::new(postpilot_infra::database::PostgresAnalyticsRepository::new(
                            conn,
                        )),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Failed to connect to database. Using in-memory fallback."
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryAnalyticsRepository::new()),
        )
    }
}
