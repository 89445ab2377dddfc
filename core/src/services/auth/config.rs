//! Configuration for the session service

use vg_shared::config::TokenExpiryConfig;

/// Rate limiter action name used for login attempts
pub const LOGIN_ACTION: &str = "login";

/// Configuration for the session service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionServiceConfig {
    /// Access token lifetime in minutes
    pub access_token_minutes: i64,
    /// Refresh token and session lifetime in minutes
    pub refresh_token_minutes: i64,
    /// Sessions expiring sooner than this are extended on refresh
    pub renewal_threshold_minutes: i64,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self::from_expiry(&TokenExpiryConfig::default())
    }
}

impl SessionServiceConfig {
    pub fn from_expiry(expiry: &TokenExpiryConfig) -> Self {
        Self {
            access_token_minutes: expiry.access_token_minutes,
            refresh_token_minutes: expiry.refresh_token_minutes,
            renewal_threshold_minutes: expiry.session_renewal_threshold_minutes,
        }
    }
}
