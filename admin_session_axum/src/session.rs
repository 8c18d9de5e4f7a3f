use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use http::{Method, StatusCode, request::Parts};

use admin_session::{Session, SessionStore};

use super::state::AuthState;

/// Session placed in the request extensions by the guard middleware
#[derive(Clone, Debug)]
pub(crate) struct GuardedSession(pub(crate) Session);

pub struct AuthRedirect {
    method: Method,
    location: String,
}

impl AuthRedirect {
    fn new(method: Method, location: String) -> Self {
        Self { method, location }
    }

    fn into_response_with_method(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", self.location);
            Redirect::temporary(&self.location).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        self.into_response_with_method()
    }
}

/// Signed-in admin, available as an Axum extractor
///
/// This is the server-side layout check for handlers rendered behind the
/// guard: it recovers the identity shown in the page header, and a request
/// without a session is redirected to the login page with `from` set to the
/// requested path (non-GET requests get `401 Unauthorized`).
///
/// Behind [`admin_guard`](crate::admin_guard) the session the guard already
/// read is reused. Used on its own, the extractor reads the session cookie
/// itself; a refresh performed there is not written back to the cookie.
///
/// # Trust
///
/// The session cookie is not signed, and neither the guard nor this
/// extractor verifies it with the auth service. `AdminUser` identifies the
/// user for display and routing only. It is not an authorization decision:
/// reads and writes of admin data must go through the auth service with the
/// session's access token, which the service validates.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use admin_session_axum::{AdminUser, AuthState};
///
/// async fn dashboard(user: AdminUser) -> String {
///     format!("Signed in as {}", user.email.unwrap_or_default())
/// }
///
/// fn app(state: AuthState) -> Router {
///     Router::new()
///         .route("/admin/dashboard", get(dashboard))
///         .with_state(state)
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminUser {
    /// User identifier issued by the auth service
    pub id: String,
    /// Display identity for the header
    pub email: Option<String>,
    /// Session expiry, seconds since the Unix epoch
    pub expires_at: i64,
}

impl From<&Session> for AdminUser {
    fn from(session: &Session) -> Self {
        AdminUser {
            id: session.user.id.clone(),
            email: session.user.email.clone(),
            expires_at: session.expires_at,
        }
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(GuardedSession(session)) = parts.extensions.get::<GuardedSession>() {
            return Ok(AdminUser::from(session));
        }

        let auth_state = AuthState::from_ref(state);
        let redirect = || {
            AuthRedirect::new(
                parts.method.clone(),
                auth_state.guard().routes.login_redirect(parts.uri.path()),
            )
        };

        match auth_state.request_store(&parts.headers).get_session().await {
            Ok(Some(session)) => Ok(AdminUser::from(&session)),
            Ok(None) => {
                tracing::debug!("No session for {}", parts.uri.path());
                Err(redirect())
            }
            Err(e) => {
                tracing::warn!("Failed to read session for {}: {}", parts.uri.path(), e);
                Err(redirect())
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AdminUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AdminUser as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
