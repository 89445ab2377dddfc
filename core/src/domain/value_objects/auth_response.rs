//! Authentication response value object.

use serde::{Deserialize, Serialize};

use super::unix_minute::UnixMinute;

/// Token pair handed out after login or refresh
///
/// Both tokens are issued from one clock snapshot so their lifetimes stay
/// correlated. The refresh token identifies the session row, the access token
/// the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Session the refresh token belongs to
    pub session_id: i64,

    /// Short-lived bearer token (`usr:<id>`)
    pub access_token: String,

    /// Long-lived refresh token (`ses:<id>`), normally sent as an HttpOnly cookie
    pub refresh_token: String,

    /// Expiry of the access token
    pub access_expires_at: UnixMinute,

    /// Expiry of the refresh token and of the session row
    pub refresh_expires_at: UnixMinute,
}

impl AuthResponse {
    /// Refresh token lifetime in seconds, for the cookie `Max-Age`
    pub fn refresh_max_age_seconds(&self, now: UnixMinute) -> i64 {
        self.refresh_expires_at.minutes_since(now).max(0).saturating_mul(60)
    }
}
