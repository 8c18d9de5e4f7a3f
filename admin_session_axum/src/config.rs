//! Central configuration for the admin_session_axum crate

use std::sync::LazyLock;

/// Prefix of the JSON/API auth endpoints, outside the guarded admin area
/// Default: "/api/auth"
pub static ADMIN_AUTH_API_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_AUTH_API_PREFIX")
        .map(|p| p.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "/api/auth".to_string())
});

/// Sign-out endpoint
/// Default: "/api/auth/signout"
pub static ADMIN_SIGNOUT_URL: LazyLock<String> =
    LazyLock::new(|| format!("{}/signout", *ADMIN_AUTH_API_PREFIX));

/// Session status endpoint polled by the timeout widget
/// Default: "/api/auth/session"
pub static ADMIN_SESSION_STATUS_URL: LazyLock<String> =
    LazyLock::new(|| format!("{}/session", *ADMIN_AUTH_API_PREFIX));

/// Session extend endpoint
/// Default: "/api/auth/session/extend"
pub static ADMIN_SESSION_EXTEND_URL: LazyLock<String> =
    LazyLock::new(|| format!("{}/session/extend", *ADMIN_AUTH_API_PREFIX));
