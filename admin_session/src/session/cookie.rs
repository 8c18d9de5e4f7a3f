use http::HeaderMap;
use http::header::COOKIE;

use super::config::{SESSION_COOKIE_NAME, SESSION_EXPIRES_IN_SECS};
use super::errors::SessionError;
use super::types::Session;
use crate::utils::{base64url_decode, base64url_encode, header_set_cookie};

/// Serialize a session into the opaque cookie value
pub fn encode_session_cookie(session: &Session) -> Result<String, SessionError> {
    let json =
        serde_json::to_vec(session).map_err(|e| SessionError::Cookie(e.to_string()))?;
    Ok(base64url_encode(&json))
}

/// Parse a cookie value produced by [`encode_session_cookie`]
pub fn decode_session_cookie(value: &str) -> Result<Session, SessionError> {
    let bytes = base64url_decode(value)?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::Cookie(e.to_string()))
}

/// Find the raw session cookie value in the request headers
pub fn get_session_cookie_from_headers(
    headers: &HeaderMap,
) -> Result<Option<&str>, SessionError> {
    let cookie_name = SESSION_COOKIE_NAME.as_str();

    for cookie_header in headers.get_all(COOKIE) {
        let cookie_str = cookie_header.to_str().map_err(|e| {
            tracing::error!("Invalid cookie header: {}", e);
            SessionError::HeaderError("Invalid cookie header".to_string())
        })?;

        let found = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
            let mut parts = s.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(k), Some(v)) if k == cookie_name => Some(v),
                _ => None,
            }
        });

        if found.is_some() {
            return Ok(found);
        }
    }

    tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    Ok(None)
}

/// Headers that store `session` in the session cookie
pub fn session_cookie_headers(session: &Session) -> Result<HeaderMap, SessionError> {
    let value = encode_session_cookie(session)?;
    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &value,
        *SESSION_EXPIRES_IN_SECS,
    )?;
    Ok(headers)
}

/// Headers that expire the session cookie
pub fn clear_session_cookie_headers() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, SESSION_COOKIE_NAME.as_str(), "deleted", -86400)?;
    Ok(headers)
}
