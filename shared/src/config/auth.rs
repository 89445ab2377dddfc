//! Token signing and expiry configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Environment variable holding the process-wide signing secret
pub const SECRET_ENV_VAR: &str = "SECRET";

/// Lifetimes of the token kinds, in minutes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenExpiryConfig {
    /// Access token lifetime
    #[serde(default = "default_access_minutes")]
    pub access_token_minutes: i64,

    /// Refresh token lifetime
    #[serde(default = "default_refresh_minutes")]
    pub refresh_token_minutes: i64,

    /// Invite token lifetime
    #[serde(default = "default_invite_minutes")]
    pub invite_token_minutes: i64,

    /// Sessions expiring sooner than this are extended on refresh
    #[serde(default = "default_session_renewal_minutes")]
    pub session_renewal_threshold_minutes: i64,
}

impl Default for TokenExpiryConfig {
    fn default() -> Self {
        Self {
            access_token_minutes: default_access_minutes(),
            refresh_token_minutes: default_refresh_minutes(),
            invite_token_minutes: default_invite_minutes(),
            session_renewal_threshold_minutes: default_session_renewal_minutes(),
        }
    }
}

/// Media token configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MediaTokenConfig {
    /// Maximum age of a media token, in minutes
    #[serde(default = "default_media_skew")]
    pub skew_tolerance_minutes: i64,
}

impl Default for MediaTokenConfig {
    fn default() -> Self {
        Self {
            skew_tolerance_minutes: default_media_skew(),
        }
    }
}

/// Complete authentication configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Signing secret shared by every token kind
    #[serde(skip_serializing)]
    pub secret: String,

    /// Token lifetimes
    #[serde(default)]
    pub tokens: TokenExpiryConfig,

    /// Media token settings
    #[serde(default)]
    pub media: MediaTokenConfig,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("tokens", &self.tokens)
            .field("media", &self.media)
            .finish()
    }
}

impl AuthConfig {
    /// Create a configuration with the given secret and default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tokens: TokenExpiryConfig::default(),
            media: MediaTokenConfig::default(),
        }
    }

    /// Create from environment variables
    ///
    /// Fails when `SECRET` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV_VAR)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingSecret {
                var: SECRET_ENV_VAR.to_string(),
            })?;

        let minutes = |key: &str, default: i64| match lookup(key) {
            None => default,
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) if v > 0 => v,
                _ => {
                    tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                    default
                }
            },
        };

        Ok(Self {
            secret,
            tokens: TokenExpiryConfig {
                access_token_minutes: minutes("ACCESS_TOKEN_MINUTES", default_access_minutes()),
                refresh_token_minutes: minutes("REFRESH_TOKEN_MINUTES", default_refresh_minutes()),
                invite_token_minutes: minutes("INVITE_TOKEN_MINUTES", default_invite_minutes()),
                session_renewal_threshold_minutes: minutes(
                    "SESSION_RENEWAL_MINUTES",
                    default_session_renewal_minutes(),
                ),
            },
            media: MediaTokenConfig {
                skew_tolerance_minutes: minutes("MEDIA_TOKEN_SKEW_MINUTES", default_media_skew()),
            },
        })
    }

    /// Secret bytes used as the HMAC key
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

fn default_access_minutes() -> i64 {
    10
}

fn default_refresh_minutes() -> i64 {
    60 * 24 * 14 // 14 days
}

fn default_invite_minutes() -> i64 {
    5
}

fn default_session_renewal_minutes() -> i64 {
    60 * 24 * 7 // 7 days
}

fn default_media_skew() -> i64 {
    2
}
