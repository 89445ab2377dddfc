//! Tests for the Redis counter store
//!
//! These require a running Redis server.

use std::sync::Arc;

use vg_core::repositories::CounterStore;
use vg_core::RateLimiter;
use vg_shared::config::{CacheConfig, RateLimitConfig};

use crate::cache::RedisClient;
use crate::services::auth::RedisCounterStore;

async fn store() -> Arc<RedisCounterStore> {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
    .with_prefix("vigil-test");
    let client = RedisClient::new(config).await.unwrap();
    Arc::new(RedisCounterStore::new(Arc::new(client)))
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_incr_and_del() {
    let store = store().await;
    let key = "login_fail:store-test";
    store.del(key).await.unwrap();

    assert_eq!(store.incr(key).await.unwrap(), 1);
    assert_eq!(store.incr(key).await.unwrap(), 2);
    store.expire(key, 60).await.unwrap();

    store.del(key).await.unwrap();
    assert_eq!(store.incr(key).await.unwrap(), 1);
    store.del(key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_rate_limiter_window() {
    let limiter = RateLimiter::new(store().await, RateLimitConfig::default());
    let ip = "203.0.113.9";
    limiter.reset(ip, "login").await.unwrap();

    for _ in 0..4 {
        assert!(limiter.check(ip, "login").await.unwrap());
    }
    assert!(!limiter.check(ip, "login").await.unwrap());

    limiter.reset(ip, "login").await.unwrap();
    assert!(limiter.check(ip, "login").await.unwrap());
    limiter.reset(ip, "login").await.unwrap();
}
