use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::HeaderMap;
use http::header::SET_COOKIE;

use admin_session::{SessionStore, clear_session_cookie_headers};

use super::login::SIGNOUT_FAILED;
use crate::state::AuthState;

/// Ends the session and sends the browser to the login page
///
/// The session cookie is expired even when the auth service could not
/// confirm the sign-out; the login page then shows a failure notice.
pub(super) async fn sign_out(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let store = state.request_store(&headers);
    let login = state.guard().routes.login.as_str();

    let location = match store.sign_out().await {
        Ok(()) => login.to_string(),
        Err(e) => {
            tracing::warn!("Sign out failed, clearing local session anyway: {}", e);
            format!("{login}?error={SIGNOUT_FAILED}")
        }
    };

    let mut response = Redirect::to(&location).into_response();
    match clear_session_cookie_headers() {
        Ok(cleared) => {
            for value in cleared.get_all(SET_COOKIE) {
                response.headers_mut().append(SET_COOKIE, value.clone());
            }
        }
        Err(e) => tracing::error!("Failed to build cookie removal header: {}", e),
    }
    response
}
