//! Authentication service module
//!
//! This module provides the session side of authentication:
//! - Login gated by a failed-attempt rate limiter
//! - Session creation and refresh token rotation
//! - Logout and bearer token authentication

mod config;
mod rate_limiter;
mod service;

#[cfg(test)]
mod tests;

pub use config::{SessionServiceConfig, LOGIN_ACTION};
pub use rate_limiter::RateLimiter;
pub use service::SessionService;
