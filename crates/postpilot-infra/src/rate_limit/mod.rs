//! Per-user generation rate limiting using the governor crate.
//!
//! Draft generation fans out to the completion endpoint, so the generate
//! route is the one inbound surface worth limiting. Limits are per-process,
//! not distributed across instances.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use postpilot_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type KeyedRateLimiter = GovernorRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum generation requests per window, per user.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window: Duration::from_secs(3600),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            max_requests: std::env::var("GENERATION_RATE_LIMIT_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            window: Duration::from_secs(
                std::env::var("GENERATION_RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
        }
    }
}

/// GCRA rate limiter keyed by user id.
pub struct GenerationRateLimiter {
    limiter: KeyedRateLimiter,
    config: RateLimitConfig,
}

impl GenerationRateLimiter {
    pub fn new(config: RateLimitConfig) -> Result<Self, RateLimitError> {
        let max = NonZeroU32::new(config.max_requests)
            .ok_or_else(|| RateLimitError::Backend("max_requests must be non-zero".into()))?;
        let quota = Quota::with_period(config.window / config.max_requests)
            .ok_or_else(|| RateLimitError::Backend("window must be non-zero".into()))?
            .allow_burst(max);

        Ok(Self {
            limiter: GovernorRateLimiter::keyed(quota),
            config,
        })
    }
}

#[async_trait]
impl RateLimiter for GenerationRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(_) => Ok(RateLimitResult {
                allowed: true,
                remaining: self.config.max_requests, // approximate
                reset_after: self.config.window,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: not_until.wait_time_from(governor::clock::Clock::now(
                    &DefaultClock::default(),
                )),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn limits_each_key_independently() {
        let limiter = GenerationRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(3600),
        })
        .unwrap();

        assert!(limiter.check("user-a").await.unwrap().allowed);
        assert!(limiter.check("user-a").await.unwrap().allowed);
        assert!(!limiter.check("user-a").await.unwrap().allowed);

        // a different user still has quota
        assert!(limiter.check("user-b").await.unwrap().allowed);
    }

    #[test]
    fn zero_max_requests_is_rejected() {
        let result = GenerationRateLimiter::new(RateLimitConfig {
            max_requests: 0,
            window: Duration::from_secs(60),
        });
        assert!(result.is_err());
    }
}
