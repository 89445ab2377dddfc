//! Time source for expiry decisions

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::domain::value_objects::UnixMinute;

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Current minute, the unit of every expiry comparison
    fn now_minute(&self) -> UnixMinute {
        UnixMinute::from_millis(self.now_millis())
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Clock frozen at the start of `minute`
    pub fn at_minute(minute: i64) -> Self {
        Self {
            millis: AtomicI64::new(minute.saturating_mul(60_000)),
        }
    }

    /// Jump to the start of `minute`
    pub fn set_minute(&self, minute: i64) {
        self.millis.store(minute.saturating_mul(60_000), Ordering::SeqCst);
    }

    /// Move forward by `minutes`
    pub fn advance_minutes(&self, minutes: i64) {
        self.millis.fetch_add(minutes.saturating_mul(60_000), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
