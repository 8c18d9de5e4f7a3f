use serde::{Deserialize, Serialize};

/// Identity attached to a session by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated-state record issued by the external auth service.
///
/// The application only holds a cached copy (cookie on the server side,
/// memory on the client side). `expires_at` is an absolute instant in
/// seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: SessionUser,
}

impl Session {
    /// Seconds left before expiry; negative once expired
    pub fn time_remaining(&self, now: i64) -> i64 {
        self.expires_at - now
    }

    /// True once the session is inside the renewal window
    pub fn is_expiring(&self, now: i64, threshold_secs: i64) -> bool {
        self.time_remaining(now) < threshold_secs
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.time_remaining(now) <= 0
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }
}

/// Options for password sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInOptions {
    pub expires_in: i64,
}

impl Default for SignInOptions {
    fn default() -> Self {
        Self {
            expires_in: *super::config::SESSION_EXPIRES_IN_SECS,
        }
    }
}
