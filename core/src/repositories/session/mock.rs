//! Mock implementation of SessionRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewSession, Session};
use crate::domain::value_objects::UnixMinute;
use crate::errors::DomainError;

use super::trait_::SessionRepository;

/// Mock session repository for testing
pub struct MockSessionRepository {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
    next_id: AtomicI64,
    saves: AtomicUsize,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            saves: AtomicUsize::new(0),
        }
    }

    /// Stored copy of a session regardless of state
    pub async fn get(&self, id: i64) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Overwrite a stored session directly
    pub async fn put(&self, session: Session) {
        self.sessions.write().await.insert(session.id, session);
    }

    /// Number of `save` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: NewSession) -> Result<Session, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let session = Session {
            id,
            user_id: session.user_id,
            name: None,
            expires_at: session.expires_at,
            disabled: false,
            history: session.history,
        };

        self.sessions.write().await.insert(id, session.clone());
        Ok(session)
    }

    async fn find_active(&self, id: i64, now: UnixMinute) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).filter(|s| s.is_active(now)).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&session.id) {
            return Err(DomainError::Internal {
                message: format!("Session {} does not exist", session.id),
            });
        }

        self.saves.fetch_add(1, Ordering::SeqCst);
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn disable_active(&self, id: i64, now: UnixMinute) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) if session.is_active(now) => {
                session.disabled = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
