//! Media access token entity.

use std::fmt;

use crate::domain::value_objects::UnixMinute;
use crate::errors::TokenError;

/// Length of the truncated hex signature carried by a media token
pub const MEDIA_SIGNATURE_LENGTH: usize = 32;

/// Group-scoped streaming token: `groupId-unixMinute-signature`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaToken {
    pub group_id: String,
    pub minute: UnixMinute,
    pub signature: String,
}

impl MediaToken {
    /// Splits a wire token into its three segments
    ///
    /// Rejects anything but exactly three `-`-separated segments, a
    /// non-numeric minute, or a signature that is not 32 characters long.
    pub fn parse(token: &str) -> Result<Self, TokenError> {
        let mut parts = token.split('-');
        let (Some(group_id), Some(minute), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        if group_id.is_empty() || signature.len() != MEDIA_SIGNATURE_LENGTH {
            return Err(TokenError::Malformed);
        }

        Ok(Self {
            group_id: group_id.to_string(),
            minute: minute.parse()?,
            signature: signature.to_string(),
        })
    }
}

impl fmt::Display for MediaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.group_id, self.minute, self.signature)
    }
}
