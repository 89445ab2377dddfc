//! Failed-attempt rate limiting backed by a shared counter store
//!
//! Each `(action, identifier)` pair owns the counter `"{action}_fail:{identifier}"`.
//! Every check increments it; the first increment also starts the window by
//! setting the key's expiry. Later attempts never extend the window, so a
//! burst is counted against one ceiling until the key expires or is reset.
//! A counter found without an expiry (the first `expire` failed or timed out
//! after the increment landed) gets one on the next attempt, so it cannot
//! outlive its window indefinitely.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use vg_shared::config::{FailMode, RateLimitConfig};

use crate::errors::RateLimitError;
use crate::repositories::CounterStore;

/// Login attempt limiter
pub struct RateLimiter<C: CounterStore> {
    store: Arc<C>,
    config: RateLimitConfig,
}

impl<C: CounterStore> RateLimiter<C> {
    pub fn new(store: Arc<C>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Counter key for an action and identifier
    pub fn key(action: &str, identifier: &str) -> String {
        format!("{}_fail:{}", action, identifier)
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Records an attempt and returns whether it is within the ceiling
    ///
    /// Store failures and timeouts are returned as errors, never folded into
    /// the verdict.
    pub async fn check(&self, identifier: &str, action: &str) -> Result<bool, RateLimitError> {
        if !self.config.enabled {
            return Ok(true);
        }

        let key = Self::key(action, identifier);
        let attempts = self.with_timeout(self.store.incr(&key)).await?;
        let needs_expiry = attempts == 1
            || self.with_timeout(self.store.missing_expiry(&key)).await?;
        if needs_expiry {
            if attempts > 1 {
                warn!(action = %action, attempts, "Restoring missing rate limit window");
            }
            self.with_timeout(self.store.expire(&key, self.config.window_seconds))
                .await?;
        }

        let allowed = attempts <= self.config.max_attempts;
        if !allowed {
            debug!(action = %action, attempts, "Rate limit exceeded");
        }
        Ok(allowed)
    }

    /// Like [`RateLimiter::check`], resolving store failures with the configured [`FailMode`]
    pub async fn check_or_deny(&self, identifier: &str, action: &str) -> bool {
        match self.check(identifier, action).await {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(action = %action, "Rate limiter unavailable: {}", e);
                self.config.fail_mode == FailMode::Open
            }
        }
    }

    /// Clears the counter, typically after a successful attempt
    pub async fn reset(&self, identifier: &str, action: &str) -> Result<(), RateLimitError> {
        if !self.config.enabled {
            return Ok(());
        }
        self.with_timeout(self.store.del(&Self::key(action, identifier)))
            .await
    }

    async fn with_timeout<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, RateLimitError>>,
    ) -> Result<T, RateLimitError> {
        let timeout_ms = self.config.store_timeout_ms;
        tokio::time::timeout(Duration::from_millis(timeout_ms), call)
            .await
            .map_err(|_| RateLimitError::Timeout { timeout_ms })?
    }
}
