use axum::{
    Router,
    routing::{get, post},
};

use crate::config::ADMIN_SIGNOUT_URL;
use crate::state::AuthState;

/// Router for the admin login form and the sign-out endpoint
pub(crate) fn router(state: &AuthState) -> Router<AuthState> {
    Router::new()
        .route(
            state.guard().routes.login.as_str(),
            get(super::login::login_page).post(super::login::login_submit),
        )
        .route(ADMIN_SIGNOUT_URL.as_str(), post(super::logout::sign_out))
}
