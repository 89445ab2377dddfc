//! Group-scoped media access tokens
//!
//! A media token binds a group id to the minute it was issued:
//! `groupId-unixMinute-sig32`. Verification recomputes the whole token and
//! compares it in constant time, then applies the freshness window. No
//! session lookup is involved, so a stream relay can call it on every
//! segment fetch.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::MediaToken;
use crate::domain::value_objects::UnixMinute;
use crate::errors::TokenError;

use super::clock::Clock;
use super::signer::{signatures_match, Signer};

const GROUP_DELIMITER: char = '-';

/// Issues and verifies media tokens
#[derive(Clone)]
pub struct MediaTokenService {
    signer: Arc<Signer>,
    clock: Arc<dyn Clock>,
    skew_minutes: i64,
}

impl MediaTokenService {
    pub fn new(signer: Arc<Signer>, clock: Arc<dyn Clock>, skew_minutes: i64) -> Self {
        Self {
            signer,
            clock,
            skew_minutes,
        }
    }

    /// Issues a token for `group_id` stamped with the current minute
    pub fn issue(&self, group_id: &str) -> Result<String, TokenError> {
        self.issue_at(group_id, self.clock.now_minute())
    }

    /// Issues a token for `group_id` stamped with `minute`
    pub fn issue_at(&self, group_id: &str, minute: UnixMinute) -> Result<String, TokenError> {
        if group_id.is_empty() || group_id.contains(GROUP_DELIMITER) {
            return Err(TokenError::ReservedCharacter {
                field: "group_id".to_string(),
            });
        }
        Ok(self.expected_token(group_id, minute))
    }

    /// Verification with the failure reason
    ///
    /// The token must be signed for `expected_group_id` and its minute must
    /// lie within `[now - skew, now]`. Tokens stamped in the future are refused.
    pub fn check(&self, token: &str, expected_group_id: &str) -> Result<MediaToken, TokenError> {
        let parsed = MediaToken::parse(token)?;

        let expected = self.expected_token(expected_group_id, parsed.minute);
        if !signatures_match(&expected, token) {
            if parsed.group_id != expected_group_id {
                return Err(TokenError::GroupMismatch);
            }
            return Err(TokenError::InvalidSignature);
        }

        let age = self.clock.now_minute().minutes_since(parsed.minute);
        if age < 0 {
            return Err(TokenError::NotYetValid);
        }
        if age > self.skew_minutes {
            return Err(TokenError::Expired);
        }

        Ok(parsed)
    }

    /// Whether `token` is a fresh, valid token for `expected_group_id`
    pub fn verify(&self, token: &str, expected_group_id: &str) -> bool {
        match self.check(token, expected_group_id) {
            Ok(_) => true,
            Err(e) => {
                debug!(group_id = %expected_group_id, "Media token rejected: {}", e);
                false
            }
        }
    }

    /// Authorizes a stream read of `path`
    ///
    /// The first path segment names the group; it must match the group the
    /// token was issued for.
    pub fn authorize_path(&self, token: &str, path: &str) -> bool {
        let path_group = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        let token_group = token.split(GROUP_DELIMITER).next().unwrap_or_default();

        if path_group.is_empty() || path_group != token_group {
            debug!(path = %path, "Media path does not belong to token group");
            return false;
        }

        self.verify(token, path_group)
    }

    fn expected_token(&self, group_id: &str, minute: UnixMinute) -> String {
        MediaToken {
            group_id: group_id.to_string(),
            minute,
            signature: self.signer.sign_media(group_id, minute),
        }
        .to_string()
    }
}
