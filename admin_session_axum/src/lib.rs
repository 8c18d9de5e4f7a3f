//! admin_session_axum - Axum integration for the admin session guard
//!
//! Provides the request guard middleware, the [`AdminUser`] extractor and
//! the login, sign-out and session status routes on top of `admin_session`.

mod api;
mod config;
mod error;
mod middleware;
mod pages;
mod router;
mod session;
mod state;

#[cfg(test)]
mod test_utils;

pub use api::SessionStatus;
pub use config::{
    ADMIN_AUTH_API_PREFIX, ADMIN_SESSION_EXTEND_URL, ADMIN_SESSION_STATUS_URL, ADMIN_SIGNOUT_URL,
};
pub use error::IntoResponseError;
pub use middleware::admin_guard;
pub use router::{admin_session_router, admin_session_router_no_trace};
pub use session::{AdminUser, AuthRedirect};
pub use state::AuthState;

// Re-export the core crate items applications need at startup
pub use admin_session::{
    ADMIN_LANDING_URL, ADMIN_LOGIN_URL, ADMIN_ROUTE_PREFIX, ADMIN_SETUP_URL, AdminRoutes,
    AuthBackend, SESSION_COOKIE_SECURE, SESSION_POLL_INTERVAL_SECS, SessionGuard,
    SupabaseAuthClient,
};
