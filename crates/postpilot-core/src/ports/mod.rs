//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod assets;
mod auth;
mod completion;
mod platform;
mod rate_limit;
mod repository;

pub use assets::{AssetStore, ImageAsset, ImageMetadata};
pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use completion::{CaptionGenerator, CaptionRequest, GeneratedCaption};
pub use platform::{PlatformClient, PublishContent, PublishedPost};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{
    AnalyticsRepository, BaseRepository, PostQuery, PostRepository, UserRepository,
};
