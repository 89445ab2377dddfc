//! Configuration for the token services

use vg_shared::config::{AuthConfig, TokenExpiryConfig};

/// Default lifetime of short-lived tokens issued without an explicit TTL
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// Configuration for [`TokenService`](super::TokenService) and
/// [`MediaTokenService`](super::MediaTokenService)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Lifetimes per token kind
    pub expiry: TokenExpiryConfig,
    /// Maximum accepted age of a media token in minutes
    pub media_skew_minutes: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            expiry: TokenExpiryConfig::default(),
            media_skew_minutes: 2,
        }
    }
}

impl TokenServiceConfig {
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            expiry: config.tokens.clone(),
            media_skew_minutes: config.media.skew_tolerance_minutes,
        }
    }
}
