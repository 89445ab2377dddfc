//! Mock implementation of CounterStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::RateLimitError;

use super::trait_::CounterStore;

/// In-memory counter store recording expiry calls
///
/// Expiry is recorded but not enforced; tests drive window resets through
/// [`MockCounterStore::expire_now`].
pub struct MockCounterStore {
    counters: Arc<RwLock<HashMap<String, i64>>>,
    ttls: Arc<RwLock<HashMap<String, u64>>>,
    expire_calls: AtomicU64,
    failing_expires: AtomicU64,
    fail: AtomicBool,
    delay: Option<Duration>,
}

impl MockCounterStore {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
            ttls: Arc::new(RwLock::new(HashMap::new())),
            expire_calls: AtomicU64::new(0),
            failing_expires: AtomicU64::new(0),
            fail: AtomicBool::new(false),
            delay: None,
        }
    }

    /// Store whose every call sleeps for `delay` first
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// Make subsequent calls fail as if the store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    /// Make the next `count` calls to `expire` fail without applying
    pub fn fail_next_expires(&self, count: u64) {
        self.failing_expires.store(count, Ordering::SeqCst);
    }

    /// Current value of `key`
    pub async fn value(&self, key: &str) -> Option<i64> {
        self.counters.read().await.get(key).copied()
    }

    /// Last TTL set on `key`
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        self.ttls.read().await.get(key).copied()
    }

    /// Number of `expire` calls made so far
    pub fn expire_calls(&self) -> u64 {
        self.expire_calls.load(Ordering::SeqCst)
    }

    /// Simulate the window elapsing for `key`
    pub async fn expire_now(&self, key: &str) {
        self.counters.write().await.remove(key);
        self.ttls.write().await.remove(key);
    }

    async fn before_call(&self) -> Result<(), RateLimitError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(RateLimitError::StoreUnavailable {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for MockCounterStore {
    async fn incr(&self, key: &str) -> Result<i64, RateLimitError> {
        self.before_call().await?;
        let mut counters = self.counters.write().await;
        let count = counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), RateLimitError> {
        self.before_call().await?;
        if self
            .failing_expires
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(RateLimitError::StoreUnavailable {
                message: "expire dropped".to_string(),
            });
        }
        self.expire_calls.fetch_add(1, Ordering::SeqCst);
        self.ttls.write().await.insert(key.to_string(), ttl_seconds);
        Ok(())
    }

    async fn missing_expiry(&self, key: &str) -> Result<bool, RateLimitError> {
        self.before_call().await?;
        let exists = self.counters.read().await.contains_key(key);
        Ok(exists && !self.ttls.read().await.contains_key(key))
    }

    async fn del(&self, key: &str) -> Result<(), RateLimitError> {
        self.before_call().await?;
        self.counters.write().await.remove(key);
        self.ttls.write().await.remove(key);
        Ok(())
    }
}
