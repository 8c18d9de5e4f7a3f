//! JSON endpoints backing the session timeout widget

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use admin_session::{Session, SessionStore, WarningState, evaluate_warning, now_epoch};

use crate::config::{ADMIN_SESSION_EXTEND_URL, ADMIN_SESSION_STATUS_URL};
use crate::error::session_error_status;
use crate::middleware::write_session_change;
use crate::state::AuthState;

/// Session state as reported to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub time_remaining: Option<i64>,
    pub show_warning: bool,
    pub minutes_remaining: Option<i64>,
}

impl SessionStatus {
    fn signed_out() -> Self {
        Self {
            authenticated: false,
            time_remaining: None,
            show_warning: false,
            minutes_remaining: None,
        }
    }

    fn from_warning(warning: WarningState) -> Self {
        Self {
            authenticated: true,
            time_remaining: warning.time_remaining,
            show_warning: warning.should_render(),
            minutes_remaining: warning.minutes_remaining(),
        }
    }
}

pub(crate) fn router() -> Router<AuthState> {
    Router::new()
        .route(ADMIN_SESSION_STATUS_URL.as_str(), get(session_status))
        .route(ADMIN_SESSION_EXTEND_URL.as_str(), post(session_extend))
}

fn status_for(state: &AuthState, session: Option<&Session>) -> SessionStatus {
    match session {
        Some(session) => SessionStatus::from_warning(evaluate_warning(
            session,
            now_epoch(),
            state.guard().refresh_threshold_secs,
        )),
        None => SessionStatus::signed_out(),
    }
}

async fn session_status(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let store = state.request_store(&headers);
    let mut response = match store.get_session().await {
        Ok(session) => Json(status_for(&state, session.as_ref())).into_response(),
        Err(e) => {
            tracing::warn!("Session status check failed: {}", e);
            (session_error_status(&e), e.to_string()).into_response()
        }
    };
    write_session_change(&store, response.headers_mut()).await;
    response
}

async fn session_extend(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let store = state.request_store(&headers);
    let mut response = match store.refresh_session().await {
        Ok(session) => {
            tracing::info!(expires_at = session.expires_at, "Session extended");
            let warning = WarningState {
                time_remaining: Some(session.time_remaining(now_epoch())),
                show: false,
            };
            Json(SessionStatus::from_warning(warning)).into_response()
        }
        Err(e) => {
            tracing::warn!("Session extend failed: {}", e);
            (session_error_status(&e), e.to_string()).into_response()
        }
    };
    write_session_change(&store, response.headers_mut()).await;
    response
}
