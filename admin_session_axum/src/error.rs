use admin_session::{SessionError, StoreError};
use http::{Result as HttpResponse, StatusCode};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Status code answering a failed session operation
pub(crate) fn session_error_status(e: &SessionError) -> StatusCode {
    match e {
        SessionError::NoSession => StatusCode::UNAUTHORIZED,
        SessionError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
        SessionError::Refresh(_) => StatusCode::UNAUTHORIZED,
        SessionError::Cookie(_) => StatusCode::BAD_REQUEST,
        SessionError::HeaderError(_) => StatusCode::BAD_REQUEST,
        SessionError::SignOut(_) => StatusCode::BAD_GATEWAY,
        SessionError::Store(StoreError::Api { status, .. }) if *status == 401 || *status == 403 => {
            StatusCode::UNAUTHORIZED
        }
        SessionError::Store(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Implementation for SessionError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (session_error_status(&e), e.to_string()))
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
