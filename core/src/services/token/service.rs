//! Issuance and verification of compact signed tokens

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{ExtractedToken, TokenKind};
use crate::domain::value_objects::UnixMinute;
use crate::errors::TokenError;

use super::clock::Clock;
use super::codec::{self, TokenParts, SEGMENT_DELIMITER};
use super::config::{TokenServiceConfig, DEFAULT_TTL_MINUTES};
use super::signature_cache::SignatureCache;
use super::signer::{signatures_match, Signer};

/// Service issuing and verifying `payload.expiresAt.signature` tokens
///
/// Every failure reason is available through [`TokenService::check`] for
/// logging and tests. The public verification calls collapse them into a
/// single negative result so an expired token cannot be told apart from a
/// forged one.
#[derive(Clone)]
pub struct TokenService {
    signer: Arc<Signer>,
    cache: Arc<dyn SignatureCache>,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl TokenService {
    /// Creates a new token service
    ///
    /// # Arguments
    ///
    /// * `signer` - Signer keyed by the process secret
    /// * `cache` - Signature memoization shared by issuance and verification
    /// * `clock` - Time source for expiry decisions
    /// * `config` - Token lifetimes
    pub fn new(
        signer: Arc<Signer>,
        cache: Arc<dyn SignatureCache>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            signer,
            cache,
            clock,
            config,
        }
    }

    /// Current minute according to the service clock
    pub fn now(&self) -> UnixMinute {
        self.clock.now_minute()
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a token for `payload` expiring `ttl_minutes` from now
    pub fn issue(&self, payload: &str, ttl_minutes: i64) -> Result<String, TokenError> {
        self.issue_until(payload, self.now().plus_minutes(ttl_minutes))
    }

    /// Issues a short-lived token with the default lifetime
    pub fn issue_short_lived(&self, payload: &str) -> Result<String, TokenError> {
        self.issue(payload, DEFAULT_TTL_MINUTES)
    }

    /// Issues a token with an absolute expiry
    ///
    /// Used when several tokens must share one expiry taken from a single
    /// clock reading.
    pub fn issue_until(&self, payload: &str, expires_at: UnixMinute) -> Result<String, TokenError> {
        if payload.contains(SEGMENT_DELIMITER) {
            return Err(TokenError::ReservedCharacter {
                field: "payload".to_string(),
            });
        }

        let unsigned = codec::build_unsigned(payload, expires_at);
        let signature = self.signature_for(&unsigned);
        Ok(codec::assemble(&unsigned, &signature))
    }

    /// Issues a token of `kind` for subject `id` with the configured lifetime
    pub fn issue_for(&self, kind: TokenKind, id: i64) -> String {
        let expires_at = self.now().plus_minutes(kind.ttl_minutes(&self.config.expiry));
        self.issue_for_until(kind, id, expires_at)
    }

    /// Issues a token of `kind` for subject `id` with an absolute expiry
    pub fn issue_for_until(&self, kind: TokenKind, id: i64, expires_at: UnixMinute) -> String {
        // Integer ids never contain a delimiter
        let unsigned = codec::build_unsigned(&subject_payload(kind, id), expires_at);
        let signature = self.signature_for(&unsigned);
        codec::assemble(&unsigned, &signature)
    }

    /// Full verification with the failure reason
    ///
    /// The expiry check runs before any signature work. A token whose expiry
    /// equals the current minute is still valid.
    pub fn check<'a>(&self, token: &'a str) -> Result<TokenParts<'a>, TokenError> {
        let parts = codec::parse(token)?;

        if parts.expires_at < self.now() {
            return Err(TokenError::Expired);
        }

        if let Some(cached) = self.cache.get(parts.unsigned) {
            if signatures_match(&cached, parts.signature) {
                return Ok(parts);
            }
            return Err(TokenError::InvalidSignature);
        }

        let expected = self.signer.sign(parts.unsigned);
        if !signatures_match(&expected, parts.signature) {
            return Err(TokenError::InvalidSignature);
        }

        // Only signatures that matched are memoized, so forged tokens cannot fill the cache
        self.cache.insert(parts.unsigned.to_string(), expected);
        Ok(parts)
    }

    /// Whether `token` is unexpired and correctly signed
    pub fn verify(&self, token: &str) -> bool {
        match self.check(token) {
            Ok(_) => true,
            Err(e) => {
                debug!("Token rejected: {}", e);
                false
            }
        }
    }

    /// Verifies `token` and returns its payload fields
    pub fn verify_and_extract(&self, token: &str) -> Option<ExtractedToken> {
        match self.check(token) {
            Ok(parts) => Some(extract_parts(&parts)),
            Err(e) => {
                debug!("Token rejected: {}", e);
                None
            }
        }
    }

    /// Decodes payload fields without verifying expiry or signature
    ///
    /// Only for data that is not trusted, such as logging or diagnostics.
    pub fn extract(&self, token: &str) -> Option<ExtractedToken> {
        codec::parse(token).ok().map(|parts| extract_parts(&parts))
    }

    /// Verifies a token of `kind` and returns its subject id
    pub fn verify_subject(&self, kind: TokenKind, token: &str) -> Option<i64> {
        self.verify_and_extract(token)?.id_for(kind)
    }

    fn signature_for(&self, unsigned: &str) -> String {
        if let Some(signature) = self.cache.get(unsigned) {
            return signature;
        }
        let signature = self.signer.sign(unsigned);
        self.cache.insert(unsigned.to_string(), signature.clone());
        signature
    }
}

fn subject_payload(kind: TokenKind, id: i64) -> String {
    format!("{}{}{}", kind.payload_key(), codec::KEY_VALUE_DELIMITER, id)
}

fn extract_parts(parts: &TokenParts<'_>) -> ExtractedToken {
    ExtractedToken::new(codec::decode_kv_payload(parts.payload), parts.expires_at)
}
