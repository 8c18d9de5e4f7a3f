use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::HeaderMap;
use http::header::SET_COOKIE;

use admin_session::{
    GuardDecision, RouteClass, SESSION_COOKIE_NAME, SessionChange, SessionStore,
    clear_session_cookie_headers, session_cookie_headers,
};

use super::session::GuardedSession;
use super::state::{AuthState, RequestSessionStore};

fn sets_session_cookie(headers: &HeaderMap) -> bool {
    let prefix = format!("{}=", SESSION_COOKIE_NAME.as_str());
    headers
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|v| v.starts_with(&prefix)))
}

/// Rewrite or expire the session cookie according to what happened to the
/// request's session store
///
/// A session cookie already set on the response, by a sign-in for instance,
/// is left as the last word.
pub(crate) async fn write_session_change(store: &RequestSessionStore, headers: &mut HeaderMap) {
    if sets_session_cookie(headers) {
        return;
    }

    let cookie_headers = match store.take_change().await {
        SessionChange::Unchanged => return,
        SessionChange::Updated(session) => session_cookie_headers(&session),
        SessionChange::Cleared => clear_session_cookie_headers(),
    };

    match cookie_headers {
        Ok(cookie_headers) => {
            for value in cookie_headers.get_all(SET_COOKIE) {
                headers.append(SET_COOKIE, value.clone());
            }
        }
        // Response still goes out, the browser keeps its old cookie
        Err(e) => tracing::error!("Failed to build session cookie: {}", e),
    }
}

/// Auth guard for the admin area
///
/// Mount with `axum::middleware::from_fn_with_state(state, admin_guard)` on
/// the application router. Paths outside the admin prefix pass through
/// untouched.
///
/// Allowed requests carry the current session in their extensions, where
/// the [`AdminUser`](crate::AdminUser) extractor picks it up.
pub async fn admin_guard(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let guard = state.guard();
    if guard.routes.classify(&path) == RouteClass::NonAdmin {
        return next.run(req).await;
    }

    let store = state.request_store(req.headers());
    let mut response = match guard.evaluate(&store, &path).await {
        // 303 for anything but a read, the targets only answer GET
        GuardDecision::Redirect(location) if is_read(req.method()) => {
            Redirect::temporary(&location).into_response()
        }
        GuardDecision::Redirect(location) => Redirect::to(&location).into_response(),
        GuardDecision::Allow => {
            if guard.reads_session(&path) {
                if let Ok(Some(session)) = store.get_session().await {
                    req.extensions_mut().insert(GuardedSession(session));
                }
            }
            next.run(req).await
        }
    };

    write_session_change(&store, response.headers_mut()).await;
    response
}

fn is_read(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}
