//! Keyed signatures for auth and media tokens
//!
//! Two signature families share the process secret:
//! - auth tokens: HMAC-SHA512 over the unsigned string, standard Base64, full length
//! - media tokens: HMAC-SHA256 over `groupId:minute`, lowercase hex truncated to
//!   32 characters (128 bits) to keep per-segment checks cheap

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

use vg_shared::config::AuthConfig;

use crate::domain::entities::MEDIA_SIGNATURE_LENGTH;
use crate::domain::value_objects::UnixMinute;
use crate::errors::{DomainError, DomainResult};

type HmacSha512 = Hmac<Sha512>;
type HmacSha256 = Hmac<Sha256>;

/// Signs token material with the process-wide secret
///
/// The keyed MAC states are prepared once; each signature clones them.
#[derive(Clone)]
pub struct Signer {
    token_mac: HmacSha512,
    media_mac: HmacSha256,
}

impl Signer {
    /// Creates a signer keyed by `secret`
    ///
    /// An empty secret is rejected; the process should refuse to start.
    pub fn new(secret: &[u8]) -> DomainResult<Self> {
        if secret.is_empty() {
            return Err(DomainError::Validation {
                message: "signing secret must not be empty".to_string(),
            });
        }

        let token_mac = HmacSha512::new_from_slice(secret).map_err(|e| DomainError::Internal {
            message: format!("failed to key token signer: {}", e),
        })?;
        let media_mac = HmacSha256::new_from_slice(secret).map_err(|e| DomainError::Internal {
            message: format!("failed to key media signer: {}", e),
        })?;

        Ok(Self { token_mac, media_mac })
    }

    /// Creates a signer from the authentication configuration
    pub fn from_config(config: &AuthConfig) -> DomainResult<Self> {
        Self::new(config.secret_bytes())
    }

    /// Base64 HMAC-SHA512 of an unsigned token string
    pub fn sign(&self, unsigned: &str) -> String {
        let mut mac = self.token_mac.clone();
        mac.update(unsigned.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Truncated hex HMAC-SHA256 binding a group to a minute
    pub fn sign_media(&self, group_id: &str, minute: UnixMinute) -> String {
        let mut mac = self.media_mac.clone();
        mac.update(format!("{}:{}", group_id, minute).as_bytes());
        let mut signature = hex::encode(mac.finalize().into_bytes());
        signature.truncate(MEDIA_SIGNATURE_LENGTH);
        signature
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

/// Timing-safe equality of two signatures or tokens
///
/// Lengths are compared first; equal-length inputs are compared in constant time.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.len() == provided.len() && constant_time_eq(expected.as_bytes(), provided.as_bytes())
}
