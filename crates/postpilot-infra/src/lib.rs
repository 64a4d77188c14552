//! # PostPilot Infrastructure
//!
//! Concrete implementations of the ports defined in `postpilot-core`:
//! database repositories, authentication, the OpenAI caption client, the
//! Facebook/LinkedIn publish clients and the filesystem image pool.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory repositories only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Per-user generation rate limiting via governor

pub mod assets;
pub mod completion;
pub mod database;
pub mod social;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports
pub use assets::{AssetConfig, FsAssetStore};
pub use completion::{OpenAiCaptionGenerator, OpenAiConfig};
pub use database::{
    InMemoryAnalyticsRepository, InMemoryPostRepository, InMemoryUserRepository,
};
pub use social::{FacebookClient, FacebookConfig, LinkedinClient, LinkedinConfig};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresAnalyticsRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{GenerationRateLimiter, RateLimitConfig};
