use std::sync::LazyLock;

/// Name of the cookie holding the serialized session
pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("sb-auth-token".to_string())
});

/// Sessions closer than this to `expires_at` are refreshed by the guard and
/// trigger the expiry warning
pub static SESSION_REFRESH_THRESHOLD_SECS: LazyLock<i64> = LazyLock::new(|| {
    parse_secs(
        std::env::var("SESSION_REFRESH_THRESHOLD_SECS").ok().as_deref(),
        300,
    )
});

/// Lifetime requested from the auth service at sign-in
pub static SESSION_EXPIRES_IN_SECS: LazyLock<i64> = LazyLock::new(|| {
    parse_secs(std::env::var("SESSION_EXPIRES_IN_SECS").ok().as_deref(), 7200)
});

/// Interval between expiry checks of the timeout monitor
pub static SESSION_POLL_INTERVAL_SECS: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(60)
});

pub static SESSION_COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("ADMIN_COOKIE_SECURE")
        .map(|val| val.to_lowercase() != "false")
        .unwrap_or(true)
});

fn parse_secs(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|s| s.parse().ok())
        .filter(|s: &i64| *s > 0)
        .unwrap_or(default)
}
