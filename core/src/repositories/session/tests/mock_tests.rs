//! Unit tests for mock session repository

use crate::domain::entities::{NewSession, SessionHistoryEntry};
use crate::domain::value_objects::UnixMinute;
use crate::repositories::session::{MockSessionRepository, SessionRepository};

fn new_session(expires_at: i64) -> NewSession {
    NewSession {
        user_id: 42,
        expires_at: UnixMinute::new(expires_at),
        history: vec![SessionHistoryEntry::new(UnixMinute::new(100), "10.0.0.1")],
    }
}

#[tokio::test]
async fn test_create_assigns_ids() {
    let repo = MockSessionRepository::new();

    let first = repo.create(new_session(200)).await.unwrap();
    let second = repo.create(new_session(200)).await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(!first.disabled);
    assert_eq!(first.user_id, 42);
}

#[tokio::test]
async fn test_find_active_filters_expired_and_disabled() {
    let repo = MockSessionRepository::new();
    let session = repo.create(new_session(200)).await.unwrap();

    assert!(repo.find_active(session.id, UnixMinute::new(199)).await.unwrap().is_some());
    assert!(repo.find_active(session.id, UnixMinute::new(200)).await.unwrap().is_none());

    assert!(repo.disable_active(session.id, UnixMinute::new(150)).await.unwrap());
    assert!(repo.find_active(session.id, UnixMinute::new(150)).await.unwrap().is_none());
    assert!(!repo.disable_active(session.id, UnixMinute::new(150)).await.unwrap());
}

#[tokio::test]
async fn test_save_requires_existing_row() {
    let repo = MockSessionRepository::new();
    let mut session = repo.create(new_session(200)).await.unwrap();

    session.expires_at = UnixMinute::new(300);
    repo.save(&session).await.unwrap();
    assert_eq!(repo.get(session.id).await.unwrap().expires_at, UnixMinute::new(300));

    session.id = 999;
    assert!(repo.save(&session).await.is_err());
}
