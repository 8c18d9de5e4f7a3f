//! Request-time authentication decision for the admin area

use crate::route::{AdminRoutes, RouteClass};
use crate::session::{SESSION_REFRESH_THRESHOLD_SECS, Session};
use crate::store::SessionStore;
use crate::utils::now_epoch;

/// Outcome of the decision table for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    Allow,
    /// Session is about to expire: renew it, then allow
    RefreshThenAllow,
    /// No session on a protected page
    RedirectToLogin(String),
    /// Signed-in user on the login page
    RedirectToLanding(String),
}

/// What the request pipeline should do after the guard ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct SessionGuard {
    pub routes: AdminRoutes,
    pub refresh_threshold_secs: i64,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self {
            routes: AdminRoutes::default(),
            refresh_threshold_secs: *SESSION_REFRESH_THRESHOLD_SECS,
        }
    }
}

impl SessionGuard {
    pub fn new(routes: AdminRoutes, refresh_threshold_secs: i64) -> Self {
        Self {
            routes,
            refresh_threshold_secs,
        }
    }

    /// Whether `path` needs the session at all
    pub fn reads_session(&self, path: &str) -> bool {
        matches!(
            self.routes.classify(path),
            RouteClass::LoginPage | RouteClass::ProtectedAdmin
        )
    }

    /// Pure decision table
    pub fn decide(&self, path: &str, session: Option<&Session>, now: i64) -> GuardAction {
        match (self.routes.classify(path), session) {
            (RouteClass::ProtectedAdmin, None) => {
                GuardAction::RedirectToLogin(self.routes.login_redirect(path))
            }
            (RouteClass::ProtectedAdmin, Some(session))
                if session.is_expiring(now, self.refresh_threshold_secs) =>
            {
                GuardAction::RefreshThenAllow
            }
            (RouteClass::LoginPage, Some(_)) => {
                GuardAction::RedirectToLanding(self.routes.landing.clone())
            }
            _ => GuardAction::Allow,
        }
    }

    /// Run the decision table against the current session.
    ///
    /// Never fails: a session that cannot be read counts as absent, and a
    /// failed proactive refresh still lets the request through.
    pub async fn evaluate<S>(&self, store: &S, path: &str) -> GuardDecision
    where
        S: SessionStore + ?Sized,
    {
        let session = if self.reads_session(path) {
            match store.get_session().await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(path, "Failed to read session, treating as signed out: {}", e);
                    None
                }
            }
        } else {
            None
        };

        match self.decide(path, session.as_ref(), now_epoch()) {
            GuardAction::Allow => GuardDecision::Allow,
            GuardAction::RefreshThenAllow => {
                match store.refresh_session().await {
                    Ok(renewed) => {
                        tracing::debug!(path, expires_at = renewed.expires_at, "Session renewed by guard");
                    }
                    Err(e) => {
                        tracing::warn!(path, "Proactive session refresh failed: {}", e);
                    }
                }
                GuardDecision::Allow
            }
            GuardAction::RedirectToLogin(location) => {
                tracing::debug!(path, "No session, redirecting to {}", location);
                GuardDecision::Redirect(location)
            }
            GuardAction::RedirectToLanding(location) => {
                tracing::debug!("Already signed in, redirecting to {}", location);
                GuardDecision::Redirect(location)
            }
        }
    }
}
