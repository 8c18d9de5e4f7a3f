use async_trait::async_trait;

use super::errors::StoreError;
use crate::session::{Session, SessionError, SignInOptions};

/// Remote operations offered by the hosted auth service.
///
/// Implementations talk to the service and nothing else; caching the
/// resulting session is the job of a [`SessionStore`].
#[async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    /// Exchange credentials for a new session.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        options: SignInOptions,
    ) -> Result<Session, StoreError>;

    /// Exchange a refresh token for a renewed session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, StoreError>;

    /// Revoke the session identified by `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError>;
}

/// Session store adapter consumed by the guard, the layout check and the
/// timeout monitor.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when signed out.
    async fn get_session(&self) -> Result<Option<Session>, SessionError>;

    /// Renew the current session.
    async fn refresh_session(&self) -> Result<Session, SessionError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        options: SignInOptions,
    ) -> Result<Session, SessionError>;

    async fn sign_out(&self) -> Result<(), SessionError>;
}

/// What happened to the cached session since the store was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    Updated(Session),
    Cleared,
}
