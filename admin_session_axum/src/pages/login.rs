use askama::Template;
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use admin_session::{SessionError, SessionStore, SignInOptions};

use crate::error::IntoResponseError;
use crate::middleware::write_session_change;
use crate::state::AuthState;

/// Value of the `error` query parameter after a failed sign-out
pub(crate) const SIGNOUT_FAILED: &str = "signout";

const SIGNOUT_FAILED_NOTICE: &str =
    "Sign out could not be confirmed with the server. Your local session was cleared.";

#[derive(Template)]
#[template(path = "admin_login.j2", escape = "html")]
struct LoginTemplate<'a> {
    login_url: &'a str,
    from: &'a str,
    email: &'a str,
    message: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginQuery {
    from: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginForm {
    email: String,
    password: String,
    #[serde(default)]
    from: Option<String>,
}

fn render_login(
    status: StatusCode,
    template: LoginTemplate<'_>,
) -> Result<Response, (StatusCode, String)> {
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok((status, html).into_response())
}

pub(super) async fn login_page(
    State(state): State<AuthState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, (StatusCode, String)> {
    let message = match query.error.as_deref() {
        Some(SIGNOUT_FAILED) => Some(SIGNOUT_FAILED_NOTICE),
        _ => None,
    };
    render_login(
        StatusCode::OK,
        LoginTemplate {
            login_url: state.guard().routes.login.as_str(),
            from: query.from.as_deref().unwrap_or_default(),
            email: "",
            message,
        },
    )
}

/// Password sign-in; on success the session cookie is set and the user is
/// sent back to `from`
pub(super) async fn login_submit(
    State(state): State<AuthState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, (StatusCode, String)> {
    let store = state.empty_store();
    let result = store
        .sign_in_with_password(&form.email, &form.password, SignInOptions::default())
        .await;

    match result {
        Ok(session) => {
            let target = state.guard().routes.return_target(form.from.as_deref());
            tracing::info!(user_id = %session.user.id, "Admin signed in, redirecting to {}", target);
            let mut response = Redirect::to(&target).into_response();
            write_session_change(&store, response.headers_mut()).await;
            Ok(response)
        }
        Err(SessionError::InvalidCredentials(message)) => {
            tracing::debug!("Admin sign-in rejected: {}", message);
            render_login(
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    login_url: state.guard().routes.login.as_str(),
                    from: form.from.as_deref().unwrap_or_default(),
                    email: &form.email,
                    message: Some(&message),
                },
            )
        }
        Err(e) => {
            tracing::error!("Admin sign-in failed: {}", e);
            Err::<Response, _>(e).into_response_error()
        }
    }
}
