use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StoreError {
    /// The auth service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The auth service answered with a non-success status
    #[error("Auth API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// The service no longer knows the session (revoked, expired or unknown)
    pub fn is_session_gone(&self) -> bool {
        matches!(self, Self::Api { status, .. } if matches!(status, 401 | 403 | 404))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
