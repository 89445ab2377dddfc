//! Memoization of token signatures
//!
//! Keys are always the full unsigned string (`payload.expiresAt`), so a
//! signature computed for one expiry is never reused for another. Entries are
//! a pure function of the secret and the key; evicting one only costs a
//! recompute.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use vg_shared::config::SignatureCacheConfig;

/// Best-effort store of computed signatures
///
/// Implementations must tolerate concurrent `get`/`insert` from many
/// verifications at once. No method may fail; a miss is always acceptable.
pub trait SignatureCache: Send + Sync {
    /// Cached signature for an unsigned token string
    fn get(&self, unsigned: &str) -> Option<String>;

    /// Remember the signature of an unsigned token string
    fn insert(&self, unsigned: String, signature: String);

    /// Apply pending evictions and drop expired entries
    fn run_maintenance(&self);

    /// Approximate number of live entries
    fn entry_count(&self) -> u64;

    /// Drop every entry
    fn clear(&self);
}

/// Bounded in-process cache with LRU-style capacity eviction and a per-entry TTL
#[derive(Clone)]
pub struct InMemorySignatureCache {
    entries: Cache<String, String>,
}

impl InMemorySignatureCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { entries }
    }

    pub fn from_config(config: &SignatureCacheConfig) -> Self {
        Self::new(config.max_entries, Duration::from_secs(config.ttl_seconds))
    }
}

impl SignatureCache for InMemorySignatureCache {
    fn get(&self, unsigned: &str) -> Option<String> {
        self.entries.get(unsigned)
    }

    fn insert(&self, unsigned: String, signature: String) {
        self.entries.insert(unsigned, signature);
    }

    fn run_maintenance(&self) {
        self.entries.run_pending_tasks();
    }

    fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }
}

/// Cache that never holds anything; every lookup recomputes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSignatureCache;

impl SignatureCache for NoopSignatureCache {
    fn get(&self, _unsigned: &str) -> Option<String> {
        None
    }

    fn insert(&self, _unsigned: String, _signature: String) {}

    fn run_maintenance(&self) {}

    fn entry_count(&self) -> u64 {
        0
    }

    fn clear(&self) {}
}

/// Builds the cache selected by configuration
pub fn signature_cache_from_config(config: &SignatureCacheConfig) -> Arc<dyn SignatureCache> {
    if config.enabled {
        Arc::new(InMemorySignatureCache::from_config(config))
    } else {
        Arc::new(NoopSignatureCache)
    }
}
