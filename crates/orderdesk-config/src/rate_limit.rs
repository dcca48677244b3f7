//! Rate limiting configuration for the session endpoints.
//!
//! Login and token refresh are the only endpoints that accept secrets, so
//! they are the only ones behind a limiter. The limiter keys on the client
//! IP taken from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`, falling back
//! to the peer address.
//!
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds between token replenishments (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size (default: 5)

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Replenishment interval in seconds for auth endpoints.
    pub auth_per_second: u64,
    /// Maximum burst for auth endpoints.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.auth_per_second),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.auth_burst_size),
        }
    }

    /// Builds the governor config for the session endpoints.
    ///
    /// # Panics
    ///
    /// Panics if either value is zero, which `from_env` never produces.
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_auth_governor_config_builds() {
        let config = RateLimitConfig {
            auth_per_second: 1,
            auth_burst_size: 1,
        };
        let _governor = config.auth_governor_config();
    }
}
