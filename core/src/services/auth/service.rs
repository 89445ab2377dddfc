//! Session lifecycle built on signed tokens
//!
//! A session row backs every refresh token (`ses:<id>`); access tokens
//! (`usr:<id>`) are never stored. Each token pair is issued from one clock
//! reading so the two lifetimes stay correlated.

use std::sync::Arc;

use tracing::{debug, info, warn};

use vg_shared::config::FailMode;

use crate::domain::entities::{NewSession, SessionHistoryEntry, TokenKind};
use crate::domain::value_objects::{AuthResponse, UnixMinute};
use crate::errors::{DomainError, DomainResult, SessionError};
use crate::repositories::{CounterStore, SessionRepository};
use crate::services::token::TokenService;

use super::config::{SessionServiceConfig, LOGIN_ACTION};
use super::rate_limiter::RateLimiter;

/// Session service handling login, refresh, logout and bearer authentication
pub struct SessionService<S, C>
where
    S: SessionRepository,
    C: CounterStore,
{
    sessions: Arc<S>,
    tokens: Arc<TokenService>,
    rate_limiter: Arc<RateLimiter<C>>,
    config: SessionServiceConfig,
}

impl<S, C> SessionService<S, C>
where
    S: SessionRepository,
    C: CounterStore,
{
    /// Creates a new session service
    ///
    /// # Arguments
    ///
    /// * `sessions` - External session store
    /// * `tokens` - Token service used for issuance and verification
    /// * `rate_limiter` - Login attempt limiter
    /// * `config` - Token lifetimes and renewal threshold
    pub fn new(
        sessions: Arc<S>,
        tokens: Arc<TokenService>,
        rate_limiter: Arc<RateLimiter<C>>,
        config: SessionServiceConfig,
    ) -> Self {
        Self {
            sessions,
            tokens,
            rate_limiter,
            config,
        }
    }

    /// Access and refresh expiries for a pair issued at `now`
    pub fn token_expirations(&self, now: UnixMinute) -> (UnixMinute, UnixMinute) {
        (
            now.plus_minutes(self.config.access_token_minutes),
            now.plus_minutes(self.config.refresh_token_minutes),
        )
    }

    /// Opens a session for an authenticated user and issues its token pair
    pub async fn create_session(
        &self,
        user_id: i64,
        fingerprint: &str,
        ip: &str,
    ) -> DomainResult<AuthResponse> {
        let now = self.tokens.now();
        let (access_expires_at, refresh_expires_at) = self.token_expirations(now);

        let session = self
            .sessions
            .create(NewSession {
                user_id,
                expires_at: refresh_expires_at,
                history: vec![SessionHistoryEntry::new(now, ip).with_fingerprint(fingerprint)],
            })
            .await?;

        info!(user_id, session_id = session.id, "Session created");

        Ok(self.issue_pair(user_id, session.id, access_expires_at, refresh_expires_at))
    }

    /// Login attempt from `ip`
    ///
    /// `verified_user` is the user whose credentials were checked by the
    /// caller, or `None` when they did not match. The attempt is counted
    /// before the credentials are considered; a successful login clears the
    /// counter.
    pub async fn login(
        &self,
        ip: &str,
        fingerprint: &str,
        verified_user: Option<i64>,
    ) -> DomainResult<AuthResponse> {
        match self.rate_limiter.check(ip, LOGIN_ACTION).await {
            Ok(true) => {}
            Ok(false) => return Err(SessionError::RateLimited.into()),
            Err(e) if self.rate_limiter.config().fail_mode == FailMode::Open => {
                warn!("Rate limiter unavailable, allowing login attempt: {}", e);
            }
            Err(e) => return Err(e.into()),
        }

        let Some(user_id) = verified_user else {
            debug!("Login rejected: invalid credentials");
            return Err(SessionError::InvalidCredentials.into());
        };

        if let Err(e) = self.rate_limiter.reset(ip, LOGIN_ACTION).await {
            warn!("Failed to reset login rate limit: {}", e);
        }

        self.create_session(user_id, fingerprint, ip).await
    }

    /// Exchanges a refresh token for a new token pair
    ///
    /// Records `ip` in the session history when it is new and extends sessions
    /// that are close to expiry.
    pub async fn refresh(&self, refresh_token: &str, ip: &str) -> DomainResult<AuthResponse> {
        let session_id = self.verified_session_id(refresh_token)?;

        let now = self.tokens.now();
        let (access_expires_at, refresh_expires_at) = self.token_expirations(now);

        let mut session = self
            .sessions
            .find_active(session_id, now)
            .await?
            .ok_or(SessionError::SessionNotFound)?;

        let mut changed = false;

        if session.record_ip(ip, now) {
            info!(user_id = session.user_id, ip = %ip, "New IP for session");
            changed = true;
        }

        if session.needs_renewal(now, self.config.renewal_threshold_minutes) {
            session.expires_at = refresh_expires_at;
            changed = true;
        }

        if changed {
            self.sessions.save(&session).await?;
        }

        Ok(self.issue_pair(session.user_id, session.id, access_expires_at, refresh_expires_at))
    }

    /// Disables the session behind a refresh token
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let session_id = self.verified_session_id(refresh_token)?;

        let disabled = self
            .sessions
            .disable_active(session_id, self.tokens.now())
            .await?;
        if !disabled {
            return Err(SessionError::SessionNotFound.into());
        }

        info!(session_id, "Session disabled");
        Ok(())
    }

    /// User id carried by a valid access token
    pub fn authenticate(&self, bearer_token: &str) -> DomainResult<i64> {
        self.tokens
            .verify_subject(TokenKind::Access, bearer_token)
            .ok_or(DomainError::Session(SessionError::InvalidToken))
    }

    fn verified_session_id(&self, refresh_token: &str) -> DomainResult<i64> {
        self.tokens
            .verify_subject(TokenKind::Refresh, refresh_token)
            .ok_or(DomainError::Session(SessionError::InvalidToken))
    }

    fn issue_pair(
        &self,
        user_id: i64,
        session_id: i64,
        access_expires_at: UnixMinute,
        refresh_expires_at: UnixMinute,
    ) -> AuthResponse {
        AuthResponse {
            session_id,
            access_token: self
                .tokens
                .issue_for_until(TokenKind::Access, user_id, access_expires_at),
            refresh_token: self
                .tokens
                .issue_for_until(TokenKind::Refresh, session_id, refresh_expires_at),
            access_expires_at,
            refresh_expires_at,
        }
    }
}
