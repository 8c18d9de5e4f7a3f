//! admin_session - Session lifecycle guard for an admin area
//!
//! This crate decides, for every admin request and every mounted admin
//! screen, whether the current session allows access. It also keeps an open
//! screen informed about upcoming expiry. Credentials and tokens are owned by
//! a hosted auth service reached through [`AuthBackend`].

mod config;
mod guard;
mod layout;
mod route;
mod scope;
mod session;
mod store;
mod timeout;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export the route configuration
pub use config::{
    ADMIN_LANDING_URL, ADMIN_LOGIN_URL, ADMIN_ROUTE_PREFIX, ADMIN_SETUP_URL, RETURN_TO_PARAM,
};
pub use route::{AdminRoutes, RouteClass};

pub use guard::{GuardAction, GuardDecision, SessionGuard};
pub use layout::{LayoutAuthCheck, LayoutOutcome};
pub use scope::ComponentScope;
pub use timeout::{
    MonitorState, SessionTimeoutWidget, TimeoutConfig, WarningState, WidgetHandle,
    evaluate_warning,
};

pub use session::{
    SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE, SESSION_EXPIRES_IN_SECS,
    SESSION_POLL_INTERVAL_SECS, SESSION_REFRESH_THRESHOLD_SECS, Session, SessionError,
    SessionUser, SignInOptions, clear_session_cookie_headers, decode_session_cookie,
    encode_session_cookie, get_session_cookie_from_headers, session_cookie_headers,
};

pub use store::{
    AuthBackend, CachedSessionStore, SessionChange, SessionStore, StoreError,
    SupabaseAuthClient,
};

pub use utils::now_epoch;
