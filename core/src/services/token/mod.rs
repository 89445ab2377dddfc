//! Token engine
//!
//! This module handles signing and verification of every token kind:
//! - Compact `payload.expiresAt.signature` tokens for users, sessions and invites
//! - Group-scoped media tokens with a short freshness window
//! - Signature memoization and its background maintenance

mod clock;
mod codec;
mod config;
mod media;
mod service;
mod signature_cache;
mod signer;
mod sweeper;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{
    build_unsigned, decode_kv_payload, encode_kv_payload, parse as parse_token, TokenParts,
};
pub use config::{TokenServiceConfig, DEFAULT_TTL_MINUTES};
pub use media::MediaTokenService;
pub use service::TokenService;
pub use signature_cache::{
    signature_cache_from_config, InMemorySignatureCache, NoopSignatureCache, SignatureCache,
};
pub use signer::{signatures_match, Signer};
pub use sweeper::{SignatureCacheSweeper, SweepResult};
