//! Token entities for the compact signed token format.

use std::collections::BTreeMap;

use vg_shared::config::TokenExpiryConfig;

use crate::domain::value_objects::UnixMinute;

/// Field name under which the raw expiry is exposed after extraction
pub const EXPIRY_FIELD: &str = "exp";

/// Kinds of auth tokens and the payload key that carries their subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bearer token identifying a user (`usr:<id>`)
    Access,
    /// Cookie token identifying a session row (`ses:<id>`)
    Refresh,
    /// Token granting access to an accepted invite (`inv:<id>`)
    Invite,
}

impl TokenKind {
    /// Payload key for this kind
    pub fn payload_key(&self) -> &'static str {
        match self {
            TokenKind::Access => "usr",
            TokenKind::Refresh => "ses",
            TokenKind::Invite => "inv",
        }
    }

    /// Configured lifetime for this kind, in minutes
    pub fn ttl_minutes(&self, config: &TokenExpiryConfig) -> i64 {
        match self {
            TokenKind::Access => config.access_token_minutes,
            TokenKind::Refresh => config.refresh_token_minutes,
            TokenKind::Invite => config.invite_token_minutes,
        }
    }
}

/// Decoded payload fields of a token plus its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedToken {
    fields: BTreeMap<String, String>,
    expires_at: UnixMinute,
}

impl ExtractedToken {
    /// Builds the result from decoded payload fields
    ///
    /// The raw expiry is merged in under [`EXPIRY_FIELD`], replacing any payload
    /// entry with the same key.
    pub fn new(mut fields: BTreeMap<String, String>, expires_at: UnixMinute) -> Self {
        fields.insert(EXPIRY_FIELD.to_string(), expires_at.to_string());
        Self { fields, expires_at }
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// All fields, including `exp`
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Expiry minute of the token
    pub fn expires_at(&self) -> UnixMinute {
        self.expires_at
    }

    /// Integer id stored under the payload key of `kind`
    pub fn id_for(&self, kind: TokenKind) -> Option<i64> {
        self.get(kind.payload_key())?.parse().ok()
    }

    /// User id of an access token
    pub fn user_id(&self) -> Option<i64> {
        self.id_for(TokenKind::Access)
    }

    /// Session id of a refresh token
    pub fn session_id(&self) -> Option<i64> {
        self.id_for(TokenKind::Refresh)
    }

    /// Invite id of an invite token
    pub fn invite_id(&self) -> Option<i64> {
        self.id_for(TokenKind::Invite)
    }
}
