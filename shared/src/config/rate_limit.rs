//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the gateway's sliding-window rate limiter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Sliding window length in milliseconds
    pub window_ms: u64,

    /// Max requests allowed per client key within one window
    pub max_requests: usize,

    /// Cap on the number of tracked client keys; stale keys are
    /// evicted once this is reached
    pub max_clients: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 60_000,
            max_requests: 10,
            max_clients: 10_000,
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from `RATE_LIMIT_*` environment variables,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_ms: env_parse("RATE_LIMIT_WINDOW_MS", defaults.window_ms),
            max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests),
            max_clients: env_parse("RATE_LIMIT_MAX_CLIENTS", defaults.max_clients),
        }
    }

    /// Window length in whole seconds, used for the `Retry-After` header
    pub fn window_seconds(&self) -> u64 {
        self.window_ms / 1000
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gateway_contract() {
        let config = RateLimitConfig::default();
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window_seconds(), 60);
    }
}
