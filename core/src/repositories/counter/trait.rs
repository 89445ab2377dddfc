//! Counter store trait backing the login rate limiter.
//!
//! The store is shared by every process serving requests, so limits hold
//! across instances. `incr` must be atomic against concurrent callers.

use async_trait::async_trait;

use crate::errors::RateLimitError;

/// Keyed integer counters with expiry
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment `key`, creating it at zero first; returns the new value
    async fn incr(&self, key: &str) -> Result<i64, RateLimitError>;

    /// Set the time to live of `key`
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), RateLimitError>;

    /// Whether `key` exists without a time to live
    async fn missing_expiry(&self, key: &str) -> Result<bool, RateLimitError>;

    /// Delete `key`; deleting a missing key is not an error
    async fn del(&self, key: &str) -> Result<(), RateLimitError>;
}
