//! Error types for token verification, rate limiting and sessions
//!
//! Token errors describe why a verification failed. They are kept for logging
//! and tests; callers of the public verification API only see a negative result.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Group mismatch")]
    GroupMismatch,

    #[error("Value for {field} contains a reserved delimiter")]
    ReservedCharacter { field: String },
}

/// Rate limiter errors
///
/// Distinct from a normal "denied" verdict so callers can choose whether an
/// unavailable counter store should allow or deny the attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Counter store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Counter store timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Session lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Too many attempts")]
    RateLimited,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session store error: {message}")]
    Store { message: String },
}
