use std::time::Duration;

use crate::config::ADMIN_LOGIN_URL;
use crate::session::{SESSION_POLL_INTERVAL_SECS, SESSION_REFRESH_THRESHOLD_SECS, Session};

/// Expiry warning recomputed on every poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningState {
    pub time_remaining: Option<i64>,
    pub show: bool,
}

impl WarningState {
    /// Whole minutes left, for the "Session Expiring Soon" notice
    pub fn minutes_remaining(&self) -> Option<i64> {
        self.time_remaining.map(|secs| secs.max(0) / 60)
    }

    pub fn should_render(&self) -> bool {
        self.show && self.time_remaining.is_some_and(|secs| secs > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MonitorState {
    /// Mount check not resolved yet
    #[default]
    Unchecked,
    /// Terminal, nothing is rendered
    Unauthenticated,
    Authenticated(WarningState),
}

impl MonitorState {
    pub fn warning(&self) -> Option<&WarningState> {
        match self {
            MonitorState::Authenticated(warning) => Some(warning),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, MonitorState::Authenticated(_))
    }
}

/// Warning for `session` as seen at `now`
pub fn evaluate_warning(session: &Session, now: i64, threshold_secs: i64) -> WarningState {
    WarningState {
        time_remaining: Some(session.time_remaining(now)),
        show: session.is_expiring(now, threshold_secs),
    }
}

#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    pub poll_interval: Duration,
    pub warning_threshold_secs: i64,
    /// Navigation target after log out
    pub login_url: String,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(*SESSION_POLL_INTERVAL_SECS),
            warning_threshold_secs: *SESSION_REFRESH_THRESHOLD_SECS,
            login_url: ADMIN_LOGIN_URL.clone(),
        }
    }
}
