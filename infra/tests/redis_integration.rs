//! Integration tests for the Redis-backed services
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p vg_infra --test redis_integration -- --ignored

use std::sync::Arc;

use vg_infra::cache::{CacheConfig, RedisClient};
use vg_infra::InfrastructureServices;
use vg_shared::config::AppConfig;

fn redis_url() -> String {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(CacheConfig::new(redis_url())).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_counter_expiry() {
    let client = RedisClient::new(CacheConfig::new(redis_url()).with_prefix("vigil-it"))
        .await
        .unwrap();
    let key = "expiry:counter";
    client.delete(key).await.unwrap();

    client.increment(key).await.unwrap();
    client.expire(key, 1).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    assert_eq!(client.increment(key).await.unwrap(), 1);
    client.delete(key).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_services_rate_limit_login() {
    let mut config = AppConfig::production("integration-secret");
    config.redis = CacheConfig::new(redis_url()).with_prefix("vigil-it");

    let services = InfrastructureServices::new(config).await.unwrap();
    let limiter = Arc::clone(&services.rate_limiter);
    let ip = "198.51.100.4";
    limiter.reset(ip, "login").await.unwrap();

    for _ in 0..4 {
        assert!(limiter.check(ip, "login").await.unwrap());
    }
    assert!(!limiter.check(ip, "login").await.unwrap());
    limiter.reset(ip, "login").await.unwrap();
}
