//! Cache configuration module

use serde::{Deserialize, Serialize};

/// In-process signature cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignatureCacheConfig {
    /// Enable signature memoization
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum number of cached signatures
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,

    /// Time to live of a cached signature in seconds
    #[serde(default = "default_signature_ttl")]
    pub ttl_seconds: u64,

    /// Interval of the background maintenance sweep in seconds (0 disables it)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for SignatureCacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_entries: default_max_entries(),
            ttl_seconds: default_signature_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl SignatureCacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let parse = |key: &str, default: u64| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        Self {
            enabled: std::env::var("SIGNATURE_CACHE_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            max_entries: parse("SIGNATURE_CACHE_MAX_ENTRIES", defaults.max_entries),
            ttl_seconds: parse("SIGNATURE_CACHE_TTL", defaults.ttl_seconds),
            sweep_interval_seconds: parse("SIGNATURE_CACHE_SWEEP_INTERVAL", defaults.sweep_interval_seconds),
        }
    }
}

/// Redis counter store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Maximum number of retry attempts per operation
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 5,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").ok().filter(|p| !p.is_empty());

        Self {
            url,
            key_prefix,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_entries() -> u64 {
    100
}

fn default_signature_ttl() -> u64 {
    600 // 10 minutes
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_cache_defaults() {
        let config = SignatureCacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.ttl_seconds, 600);
        assert_eq!(config.sweep_interval_seconds, 60);
    }

    #[test]
    fn test_signature_cache_partial_deserialize() {
        let config: SignatureCacheConfig =
            serde_json::from_str(r#"{ "max_entries": 10 }"#).unwrap();
        assert_eq!(config.max_entries, 10);
        assert_eq!(config.ttl_seconds, 600);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379").with_prefix("vigil");
        assert_eq!(config.make_key("login_fail:10.0.0.1"), "vigil:login_fail:10.0.0.1");
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("login_fail:10.0.0.1"), "login_fail:10.0.0.1");
        assert_eq!(config.max_retries, 3);
    }
}
