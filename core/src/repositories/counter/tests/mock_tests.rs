//! Unit tests for mock counter store

use crate::errors::RateLimitError;
use crate::repositories::counter::{CounterStore, MockCounterStore};

#[tokio::test]
async fn test_incr_counts_from_one() {
    let store = MockCounterStore::new();

    assert_eq!(store.incr("login_fail:10.0.0.1").await.unwrap(), 1);
    assert_eq!(store.incr("login_fail:10.0.0.1").await.unwrap(), 2);
    assert_eq!(store.incr("login_fail:10.0.0.2").await.unwrap(), 1);
}

#[tokio::test]
async fn test_del_resets() {
    let store = MockCounterStore::new();

    store.incr("k").await.unwrap();
    store.expire("k", 300).await.unwrap();
    store.del("k").await.unwrap();

    assert_eq!(store.value("k").await, None);
    assert_eq!(store.ttl("k").await, None);
    store.del("missing").await.unwrap();
}

#[tokio::test]
async fn test_unavailable() {
    let store = MockCounterStore::new();
    store.set_unavailable(true);

    assert!(matches!(
        store.incr("k").await,
        Err(RateLimitError::StoreUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_missing_expiry() {
    let store = MockCounterStore::new();

    assert!(!store.missing_expiry("k").await.unwrap());
    store.incr("k").await.unwrap();
    assert!(store.missing_expiry("k").await.unwrap());

    store.fail_next_expires(1);
    assert!(store.expire("k", 300).await.is_err());
    assert!(store.missing_expiry("k").await.unwrap());

    store.expire("k", 300).await.unwrap();
    assert!(!store.missing_expiry("k").await.unwrap());
}
