//! Background maintenance of the signature cache
//!
//! The in-memory cache evicts lazily. This task drives pending evictions on
//! a fixed interval so expired signatures do not linger in an idle process.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use vg_shared::config::SignatureCacheConfig;

use super::signature_cache::SignatureCache;

/// Periodically sweeps a [`SignatureCache`]
pub struct SignatureCacheSweeper {
    cache: Arc<dyn SignatureCache>,
    config: SignatureCacheConfig,
}

impl SignatureCacheSweeper {
    pub fn new(cache: Arc<dyn SignatureCache>, config: SignatureCacheConfig) -> Self {
        Self { cache, config }
    }

    /// Run a single sweep
    pub fn run_sweep(&self) -> SweepResult {
        let entries_before = self.cache.entry_count();
        self.cache.run_maintenance();
        let entries_after = self.cache.entry_count();

        debug!(
            "Signature cache sweep - before: {}, after: {}",
            entries_before, entries_after
        );

        SweepResult {
            entries_before,
            entries_after,
        }
    }

    /// Start the sweep as a background task
    ///
    /// Returns `None` when the cache is disabled or the interval is zero.
    /// Must be called from within a tokio runtime.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled || self.config.sweep_interval_seconds == 0 {
            warn!("Signature cache sweeper is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.sweep_interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Signature cache sweeper started - will run every {} seconds",
                self.config.sweep_interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_sweep();
            }
        }))
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Entry count before maintenance
    pub entries_before: u64,
    /// Entry count after maintenance
    pub entries_after: u64,
}

impl SweepResult {
    /// Number of entries evicted by the sweep
    pub fn evicted(&self) -> u64 {
        self.entries_before.saturating_sub(self.entries_after)
    }
}
