//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{RateLimiter, SessionService, SessionServiceConfig, LOGIN_ACTION};
pub use token::{
    Clock, InMemorySignatureCache, ManualClock, MediaTokenService, NoopSignatureCache,
    SignatureCache, SignatureCacheSweeper, Signer, SystemClock, TokenService,
    TokenServiceConfig,
};
