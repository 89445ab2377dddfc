//! # Vigil Core
//!
//! Signed token engine for the Vigil backend.
//! This crate contains the token formats, signing and verification services,
//! the signature cache, failed-attempt rate limiting, session rotation,
//! repository interfaces and error types.
//!
//! Every expiry is expressed in [`UnixMinute`]s. Verification never reports
//! why a token was refused to its caller; the reasons stay available through
//! the `check` methods for logging and tests.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    ExtractedToken, MediaToken, NewSession, Session, SessionHistoryEntry, TokenKind,
};
pub use domain::value_objects::{AuthResponse, UnixMinute};
pub use errors::{DomainError, DomainResult, RateLimitError, SessionError, TokenError};
pub use repositories::{CounterStore, SessionRepository};
pub use services::auth::{RateLimiter, SessionService, SessionServiceConfig};
pub use services::token::{
    signature_cache_from_config, Clock, InMemorySignatureCache, MediaTokenService,
    NoopSignatureCache, SignatureCache, SignatureCacheSweeper, Signer, SystemClock,
    TokenService, TokenServiceConfig,
};
