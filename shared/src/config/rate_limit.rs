//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// How callers should treat an unreachable counter store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailMode {
    /// Allow the attempt
    Open,
    /// Deny the attempt
    Closed,
}

impl Default for FailMode {
    fn default() -> Self {
        FailMode::Closed
    }
}

/// Failed-attempt rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Attempts allowed inside one window
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i64,

    /// Window length in seconds, started by the first attempt
    #[serde(default = "default_window")]
    pub window_seconds: u64,

    /// Decision applied by `check_or_deny` when the store fails
    #[serde(default)]
    pub fail_mode: FailMode,

    /// Upper bound for a single counter store call in milliseconds
    #[serde(default = "default_store_timeout")]
    pub store_timeout_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_attempts: default_max_attempts(),
            window_seconds: default_window(),
            fail_mode: FailMode::default(),
            store_timeout_ms: default_store_timeout(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            max_attempts: 20,
            fail_mode: FailMode::Open,
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_attempts() -> i64 {
    4
}

fn default_window() -> u64 {
    60 * 5 // 5 minutes
}

fn default_store_timeout() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.window_seconds, 300);
        assert_eq!(config.fail_mode, FailMode::Closed);
        assert_eq!(config, RateLimitConfig::production());
    }

    #[test]
    fn test_development_is_lenient() {
        let config = RateLimitConfig::development();
        assert!(config.max_attempts > RateLimitConfig::default().max_attempts);
        assert_eq!(config.fail_mode, FailMode::Open);
    }

    #[test]
    fn test_fail_mode_deserialize() {
        let config: RateLimitConfig = serde_json::from_str(r#"{ "fail_mode": "open" }"#).unwrap();
        assert_eq!(config.fail_mode, FailMode::Open);
        assert_eq!(config.max_attempts, 4);
    }
}
