/*
 * Responsibility
 * - Hold the {token, owner capability} pair for the lifetime of the process
 * - Single writer (the manager), many cheap readers (watch handles)
 * - Capability is computed once per installed token, never per read
 */
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

use crate::services::auth::claims;
use crate::services::auth::provider::{TokenError, TokenProvider};

/// Immutable snapshot of the authenticated state. Replaced wholesale when a
/// token is acquired or cleared; never mutated field by field.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Option<String>,
    /// All owner permissions present in the token claims. Advisory only:
    /// it decides which controls the console offers, while the backend
    /// re-authorizes every request from the same bearer token.
    pub owner: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self {
            token: None,
            owner: false,
            expires_at: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Read side of the session. Cloneable, hand one to every request-issuing
/// component instead of letting them reach for a global.
#[derive(Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Arc<Session>>,
}

impl SessionHandle {
    pub fn current(&self) -> Arc<Session> {
        self.rx.borrow().clone()
    }
}

/// Owns the session lifecycle: constructed once at startup, acquires a
/// token only when none is held, and installs each new snapshot through a
/// watch channel so readers observe the change without recomputation.
pub struct SessionManager {
    provider: Arc<dyn TokenProvider>,
    tx: watch::Sender<Arc<Session>>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Session::signed_out()));
        Self { provider, tx }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.tx.subscribe(),
        }
    }

    pub fn current(&self) -> Arc<Session> {
        self.tx.borrow().clone()
    }

    /// Acquire a token iff none is currently held.
    ///
    /// On success the new session snapshot (token + capability computed
    /// here, once) replaces the old one. On failure the session stays
    /// signed out and the error is returned for the caller to log and
    /// route on; the next `ensure_token` call is the only retry.
    pub async fn ensure_token(&self) -> Result<Arc<Session>, TokenError> {
        let current = self.current();
        if current.is_authenticated() {
            return Ok(current);
        }

        let acquired = self.provider.acquire().await?;

        let owner = claims::capability_for(&acquired.access_token);
        let expires_at = acquired
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs as i64));

        let session = Arc::new(Session {
            token: Some(acquired.access_token),
            owner,
            expires_at,
        });
        self.tx.send_replace(session.clone());

        tracing::debug!(owner, "session established");
        Ok(session)
    }

    /// Drop the held token and capability (sign-out).
    pub fn clear(&self) {
        self.tx.send_replace(Arc::new(Session::signed_out()));
    }
}
