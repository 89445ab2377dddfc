//! Shared configuration and logging for the Vigil server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types and environment loaders
//! - Logging initialisation
//! - Configuration error type

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, Environment, FailMode, LoggingConfig,
    MediaTokenConfig, RateLimitConfig, SignatureCacheConfig, TokenExpiryConfig,
};
pub use errors::ConfigError;
pub use logging::init_logging;
