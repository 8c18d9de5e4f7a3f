use thiserror::Error;

use crate::store::StoreError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("No active session")]
    NoSession,

    /// The auth service rejected the supplied credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Refresh failed: {0}")]
    Refresh(String),

    #[error("Sign out failed: {0}")]
    SignOut(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Header error: {0}")]
    HeaderError(String),

    /// Error from the session store adapter
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
