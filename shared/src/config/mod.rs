//! Configuration module
//!
//! - `auth` - Signing secret and token lifetimes
//! - `cache` - Signature cache and Redis configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Failed-attempt rate limiting

pub mod auth;
pub mod cache;
pub mod environment;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

// Re-export commonly used types
pub use auth::{AuthConfig, MediaTokenConfig, TokenExpiryConfig};
pub use cache::{CacheConfig, SignatureCacheConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{FailMode, RateLimitConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Signing configuration
    pub auth: AuthConfig,

    /// Signature cache configuration
    #[serde(default)]
    pub signature_cache: SignatureCacheConfig,

    /// Redis configuration
    #[serde(default)]
    pub redis: CacheConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development(secret: impl Into<String>) -> Self {
        Self {
            environment: Environment::Development,
            auth: AuthConfig::new(secret),
            signature_cache: SignatureCacheConfig::default(),
            redis: CacheConfig::default(),
            rate_limit: RateLimitConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production(secret: impl Into<String>) -> Self {
        Self {
            environment: Environment::Production,
            auth: AuthConfig::new(secret),
            signature_cache: SignatureCacheConfig::default(),
            redis: CacheConfig::default(),
            rate_limit: RateLimitConfig::production(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Returns `ConfigError::MissingSecret` when no signing secret is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        let auth = AuthConfig::from_env()?;

        let mut config = if env.is_production() {
            Self::production(String::new())
        } else {
            let mut config = Self::development(String::new());
            config.environment = env;
            config.logging = LoggingConfig::for_environment(env);
            config
        };
        config.auth = auth;
        config.signature_cache = SignatureCacheConfig::from_env();
        config.redis = CacheConfig::from_env();
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let dev = AppConfig::development("dev-secret");
        assert_eq!(dev.environment, Environment::Development);
        assert_eq!(dev.rate_limit.fail_mode, FailMode::Open);

        let prod = AppConfig::production("prod-secret");
        assert!(prod.environment.is_production());
        assert_eq!(prod.rate_limit.fail_mode, FailMode::Closed);
        assert_eq!(prod.auth.secret, "prod-secret");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "environment": "staging", "auth": { "secret": "abc" } }"#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.auth.secret, "abc");
        assert_eq!(config.auth.tokens.access_token_minutes, 10);
        assert_eq!(config.signature_cache.max_entries, 100);
        assert_eq!(config.rate_limit.max_attempts, 4);
    }
}
