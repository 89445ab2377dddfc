//! Minute-granularity timestamps used for every expiry comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TokenError;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Whole minutes elapsed since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixMinute(i64);

impl UnixMinute {
    /// Wraps a raw minute counter
    pub const fn new(minute: i64) -> Self {
        Self(minute)
    }

    /// Converts epoch milliseconds, rounding toward negative infinity
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.div_euclid(MILLIS_PER_MINUTE))
    }

    /// Raw minute counter
    pub fn value(self) -> i64 {
        self.0
    }

    /// This minute shifted by `minutes` (saturating)
    pub fn plus_minutes(self, minutes: i64) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Minutes from `earlier` to `self`; negative when `earlier` is later
    pub fn minutes_since(self, earlier: UnixMinute) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for UnixMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UnixMinute {
    type Err = TokenError;

    /// Accepts ASCII digits only; signs, whitespace and overflow are malformed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::Malformed);
        }
        s.parse::<i64>().map(Self).map_err(|_| TokenError::Malformed)
    }
}

impl From<i64> for UnixMinute {
    fn from(minute: i64) -> Self {
        Self(minute)
    }
}
