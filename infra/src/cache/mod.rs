//! Cache module for Redis access
//!
//! Redis holds the shared failed-attempt counters so limits apply across
//! every server instance.

pub mod redis_client;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use vg_shared::config::cache::CacheConfig;
