//! Application configuration loaded from environment variables.
//!
//! Every service receives its configuration struct explicitly; nothing reads
//! the environment after startup.

use std::env;

use postpilot_infra::assets::AssetConfig;
use postpilot_infra::auth::JwtConfig;
use postpilot_infra::completion::OpenAiConfig;
use postpilot_infra::database::DatabaseConfig;
use postpilot_infra::rate_limit::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub openai: OpenAiConfig,
    pub assets: AssetConfig,
    pub rate_limit: RateLimitConfig,
    /// Disable to run without the recurring posting scheduler.
    pub scheduler_enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.max_connections = max;
            }
            if let Some(min) = env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            openai: OpenAiConfig::from_env(),
            assets: AssetConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            scheduler_enabled: env::var("SCHEDULER_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
