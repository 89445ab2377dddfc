//! Session entity owned by the external session store.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UnixMinute;

/// Maximum number of fingerprint characters kept in session history
pub const FINGERPRINT_MAX_CHARS: usize = 32;

/// One observed client for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistoryEntry {
    /// Minute the client was first seen
    pub at: UnixMinute,

    /// Client IP address
    pub ip: String,

    /// Truncated device fingerprint, recorded at login only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl SessionHistoryEntry {
    /// Entry for an IP seen at `at`
    pub fn new(at: UnixMinute, ip: impl Into<String>) -> Self {
        Self {
            at,
            ip: ip.into(),
            fingerprint: None,
        }
    }

    /// Attach a device fingerprint, truncated to [`FINGERPRINT_MAX_CHARS`]
    pub fn with_fingerprint(mut self, fingerprint: &str) -> Self {
        self.fingerprint = Some(fingerprint.chars().take(FINGERPRINT_MAX_CHARS).collect());
        self
    }
}

/// Session row backing a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub expires_at: UnixMinute,
    pub disabled: bool,
    #[serde(default)]
    pub history: Vec<SessionHistoryEntry>,
}

impl Session {
    /// Not disabled and not yet expired
    pub fn is_active(&self, now: UnixMinute) -> bool {
        !self.disabled && self.expires_at > now
    }

    /// Whether `ip` already appears in the history
    pub fn has_seen_ip(&self, ip: &str) -> bool {
        self.history.iter().any(|entry| entry.ip == ip)
    }

    /// Appends `ip` to the history unless already present; returns true when added
    pub fn record_ip(&mut self, ip: &str, now: UnixMinute) -> bool {
        if self.has_seen_ip(ip) {
            return false;
        }
        self.history.push(SessionHistoryEntry::new(now, ip));
        true
    }

    /// Whether the session expires within `threshold_minutes` of `now`
    pub fn needs_renewal(&self, now: UnixMinute, threshold_minutes: i64) -> bool {
        self.expires_at < now.plus_minutes(threshold_minutes)
    }
}

/// Data required to create a session row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub user_id: i64,
    pub expires_at: UnixMinute,
    pub history: Vec<SessionHistoryEntry>,
}
