//! Combined router for the admin session endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::state::AuthState;

/// Create a router for the admin session endpoints
///
/// The endpoints are mounted at absolute paths, so merge this router into
/// the application router rather than nesting it:
/// - {ADMIN_LOGIN_URL} (GET form, POST sign-in)
/// - {ADMIN_SIGNOUT_URL} (POST)
/// - {ADMIN_SESSION_STATUS_URL} (GET) and {ADMIN_SESSION_EXTEND_URL} (POST)
///
/// The guard itself is not part of this router; layer
/// [`admin_guard`](crate::admin_guard) over the whole application.
pub fn admin_session_router(state: AuthState) -> Router {
    admin_session_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `admin_session_router()` without the HTTP tracing middleware.
pub fn admin_session_router_no_trace(state: AuthState) -> Router {
    Router::new()
        .merge(super::pages::router(&state))
        .merge(super::api::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::admin_guard;
    use crate::session::AdminUser;
    use crate::test_utils::{MockAuthBackend, TEST_EMAIL, TEST_PASSWORD, body_string, state_with};
    use axum::{body::Body, middleware::from_fn_with_state, routing::get};
    use http::{
        Method, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn waitlist(user: AdminUser) -> String {
        format!("waitlist for {}", user.email.unwrap_or_default())
    }

    fn app(backend: Arc<MockAuthBackend>) -> Router {
        let state = state_with(backend);
        Router::new()
            .route("/admin/waitlist", get(waitlist))
            .with_state(state.clone())
            .merge(admin_session_router(state.clone()))
            .layer(from_fn_with_state(state, admin_guard))
    }

    /// `Cookie` header echoing the first `Set-Cookie` of `response`
    fn cookie_from(response: &axum::response::Response) -> String {
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_login_round_trip_returns_to_requested_page() {
        let backend = Arc::new(MockAuthBackend::new());

        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .uri("/admin/waitlist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let login_location = response.headers().get(LOCATION).unwrap().to_str().unwrap();
        assert_eq!(login_location, "/admin/login?from=%2Fadmin%2Fwaitlist");

        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .uri(login_location)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let form = format!(
            "email={}&password={}&from=%2Fadmin%2Fwaitlist",
            urlencoding::encode(TEST_EMAIL),
            urlencoding::encode(TEST_PASSWORD)
        );
        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/admin/login")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/admin/waitlist");
        let cookie = cookie_from(&response);

        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .uri("/admin/waitlist")
                    .header(COOKIE, cookie.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, format!("waitlist for {TEST_EMAIL}"));

        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/signout")
                    .header(COOKIE, cookie.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/admin/login");
        assert_eq!(backend.sign_out_calls(), 1);
    }

    #[tokio::test]
    async fn test_status_endpoint_is_not_guarded() {
        let response = app(Arc::new(MockAuthBackend::new()))
            .oneshot(
                Request::builder()
                    .uri("/api/auth/session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#""authenticated":false"#));
    }

    #[tokio::test]
    async fn test_login_over_stale_cookie_keeps_new_session() {
        let backend = Arc::new(MockAuthBackend::new());
        let form = format!(
            "email={}&password={}&from=%2Fadmin%2Fwaitlist",
            urlencoding::encode(TEST_EMAIL),
            urlencoding::encode(TEST_PASSWORD)
        );
        let response = app(backend.clone())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/admin/login")
                    .header(COOKIE, format!("{}=garbage", admin_session::SESSION_COOKIE_NAME.as_str()))
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookies: Vec<_> = response.headers().get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].to_str().unwrap().contains("Max-Age=7200"));

        let response = app(backend)
            .oneshot(
                Request::builder()
                    .uri("/admin/waitlist")
                    .header(COOKIE, cookie_from(&response))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
