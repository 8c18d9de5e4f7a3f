use async_trait::async_trait;
use http::HeaderMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::errors::StoreError;
use super::types::{AuthBackend, SessionChange, SessionStore};
use crate::session::{
    Session, SessionError, SignInOptions, decode_session_cookie, get_session_cookie_from_headers,
};
use crate::utils::now_epoch;

struct Slot {
    session: Option<Session>,
    read_error: Option<SessionError>,
    change: SessionChange,
}

impl Slot {
    fn set(&mut self, session: Session) {
        self.session = Some(session.clone());
        self.change = SessionChange::Updated(session);
    }

    fn clear(&mut self) {
        self.session = None;
        self.change = SessionChange::Cleared;
    }
}

/// Session store holding a cached copy of the session in front of an
/// [`AuthBackend`].
///
/// On the server a fresh store is built per request from the session cookie
/// ([`CachedSessionStore::from_headers`]) and [`CachedSessionStore::take_change`]
/// tells the caller whether the cookie has to be rewritten. On the client a
/// single store is shared by every component that needs the session.
pub struct CachedSessionStore<B: AuthBackend + ?Sized> {
    backend: Arc<B>,
    slot: Mutex<Slot>,
}

impl<B: AuthBackend + ?Sized> CachedSessionStore<B> {
    /// Empty store, nobody signed in
    pub fn new(backend: Arc<B>) -> Self {
        Self::from_parts(backend, None, None, SessionChange::Unchanged)
    }

    pub fn with_session(backend: Arc<B>, session: Session) -> Self {
        Self::from_parts(backend, Some(session), None, SessionChange::Unchanged)
    }

    /// Store seeded from the session cookie of an incoming request.
    ///
    /// A cookie that cannot be parsed leaves the store empty. The failure is
    /// reported by the first [`SessionStore::get_session`] call and the cookie
    /// is marked for removal.
    pub fn from_headers(backend: Arc<B>, headers: &HeaderMap) -> Self {
        let parsed = get_session_cookie_from_headers(headers)
            .and_then(|cookie| cookie.map(decode_session_cookie).transpose());

        match parsed {
            Ok(session) => Self::from_parts(backend, session, None, SessionChange::Unchanged),
            Err(e) => {
                tracing::warn!("Discarding unreadable session cookie: {}", e);
                Self::from_parts(backend, None, Some(e), SessionChange::Cleared)
            }
        }
    }

    fn from_parts(
        backend: Arc<B>,
        session: Option<Session>,
        read_error: Option<SessionError>,
        change: SessionChange,
    ) -> Self {
        Self {
            backend,
            slot: Mutex::new(Slot {
                session,
                read_error,
                change,
            }),
        }
    }

    /// Return and reset the pending change to the cached session
    pub async fn take_change(&self) -> SessionChange {
        let mut slot = self.slot.lock().await;
        std::mem::replace(&mut slot.change, SessionChange::Unchanged)
    }
}

#[async_trait]
impl<B: AuthBackend + ?Sized> SessionStore for CachedSessionStore<B> {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        let mut slot = self.slot.lock().await;
        if let Some(err) = slot.read_error.take() {
            return Err(err);
        }

        let Some(session) = slot.session.clone() else {
            return Ok(None);
        };

        if !session.is_expired(now_epoch()) {
            return Ok(Some(session));
        }

        // An expired access token is only usable after a successful refresh
        tracing::debug!("Cached session expired at {}, refreshing", session.expires_at);
        match self.backend.refresh_session(&session.refresh_token).await {
            Ok(renewed) => {
                slot.set(renewed.clone());
                Ok(Some(renewed))
            }
            Err(e) => {
                if e.is_session_gone() {
                    slot.clear();
                }
                Err(SessionError::Store(e))
            }
        }
    }

    async fn refresh_session(&self) -> Result<Session, SessionError> {
        let mut slot = self.slot.lock().await;
        let refresh_token = slot
            .session
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(SessionError::NoSession)?;

        match self.backend.refresh_session(&refresh_token).await {
            Ok(renewed) => {
                tracing::debug!("Session refreshed, expires at {}", renewed.expires_at);
                slot.set(renewed.clone());
                Ok(renewed)
            }
            Err(e) => {
                if e.is_session_gone() {
                    slot.clear();
                }
                Err(SessionError::Refresh(e.to_string()))
            }
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        options: SignInOptions,
    ) -> Result<Session, SessionError> {
        let session = self
            .backend
            .sign_in_with_password(email, password, options)
            .await
            .map_err(|e| match e {
                StoreError::Api { status, message } if (400..500).contains(&status) => {
                    SessionError::InvalidCredentials(message)
                }
                other => SessionError::Store(other),
            })?;

        tracing::info!(user_id = %session.user.id, "Signed in");
        let mut slot = self.slot.lock().await;
        slot.read_error = None;
        slot.set(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().await;
        let Some(access_token) = slot.session.as_ref().map(|s| s.access_token.clone()) else {
            slot.clear();
            return Ok(());
        };

        match self.backend.sign_out(&access_token).await {
            Ok(()) => {}
            // Already revoked on the service side
            Err(e) if e.is_session_gone() => {
                tracing::debug!("Session already gone on sign out: {}", e);
            }
            Err(e) => return Err(SessionError::SignOut(e.to_string())),
        }

        tracing::info!("Signed out");
        slot.clear();
        Ok(())
    }
}
