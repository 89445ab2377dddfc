//! Redis-backed counter store for the login rate limiter

use async_trait::async_trait;
use std::sync::Arc;

use vg_core::repositories::CounterStore;
use vg_core::RateLimitError;

use crate::cache::redis_client::RedisClient;
use crate::InfrastructureError;

/// Counter store shared by every instance through Redis
///
/// `INCR` is atomic on the server, so concurrent attempts from one client
/// are all counted.
#[derive(Clone)]
pub struct RedisCounterStore {
    redis_client: Arc<RedisClient>,
}

impl RedisCounterStore {
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self { redis_client }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr(&self, key: &str) -> Result<i64, RateLimitError> {
        self.redis_client.increment(key).await.map_err(store_error)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), RateLimitError> {
        self.redis_client
            .expire(key, ttl_seconds)
            .await
            .map(|_| ())
            .map_err(store_error)
    }

    async fn missing_expiry(&self, key: &str) -> Result<bool, RateLimitError> {
        self.redis_client.is_persistent(key).await.map_err(store_error)
    }

    async fn del(&self, key: &str) -> Result<(), RateLimitError> {
        self.redis_client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}

fn store_error(error: InfrastructureError) -> RateLimitError {
    RateLimitError::StoreUnavailable {
        message: error.to_string(),
    }
}
