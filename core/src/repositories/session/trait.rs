//! Session repository trait defining the interface for session persistence.
//!
//! Sessions live in an external store. The core only relies on the
//! operations below; "active" always means not disabled and expiring after
//! the given minute.

use async_trait::async_trait;

use crate::domain::entities::{NewSession, Session};
use crate::domain::value_objects::UnixMinute;
use crate::errors::DomainError;

/// Repository trait for Session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a session row and return it with its assigned id
    async fn create(&self, session: NewSession) -> Result<Session, DomainError>;

    /// Find a session that is active at `now`
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - Session exists, is not disabled and expires after `now`
    /// * `Ok(None)` - No such active session
    /// * `Err(DomainError)` - Store error
    async fn find_active(&self, id: i64, now: UnixMinute) -> Result<Option<Session>, DomainError>;

    /// Persist changes to an existing session
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Disable a session that is active at `now`
    ///
    /// Returns `false` when no active session matched.
    async fn disable_active(&self, id: i64, now: UnixMinute) -> Result<bool, DomainError>;
}
