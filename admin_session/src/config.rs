//! Central configuration for the admin_session crate

use std::sync::LazyLock;

/// Route prefix of the protected admin area
///
/// Default: "/admin"
pub static ADMIN_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_ROUTE_PREFIX")
        .map(|p| p.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "/admin".to_string())
});

/// Admin login page, public
///
/// Default: "/admin/login"
pub static ADMIN_LOGIN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_LOGIN_URL").unwrap_or_else(|_| format!("{}/login", *ADMIN_ROUTE_PREFIX))
});

/// Admin account bootstrap page, public
///
/// Default: "/admin/setup-admin"
pub static ADMIN_SETUP_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_SETUP_URL")
        .unwrap_or_else(|_| format!("{}/setup-admin", *ADMIN_ROUTE_PREFIX))
});

/// Where authenticated users land by default
///
/// Default: "/admin/dashboard"
pub static ADMIN_LANDING_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_LANDING_URL")
        .unwrap_or_else(|_| format!("{}/dashboard", *ADMIN_ROUTE_PREFIX))
});

/// Query parameter carrying the originally requested path to the login page
pub const RETURN_TO_PARAM: &str = "from";
