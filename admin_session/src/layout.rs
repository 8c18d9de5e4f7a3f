//! Mount-time re-verification of the session for admin screens

use crate::route::{AdminRoutes, RouteClass};
use crate::scope::ComponentScope;
use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// Public admin page, no check performed
    Skipped,
    /// Session confirmed; `email` is shown in the header
    Authenticated { email: Option<String> },
    /// Session missing, for instance after it expired during a client-side
    /// navigation that never hit the request guard
    RedirectToLogin(String),
}

#[derive(Debug, Clone, Default)]
pub struct LayoutAuthCheck {
    routes: AdminRoutes,
}

impl LayoutAuthCheck {
    pub fn new(routes: AdminRoutes) -> Self {
        Self { routes }
    }

    /// Check the session for the screen at `path`.
    ///
    /// Returns `None` when `scope` unmounted before the session read resolved;
    /// the caller must then leave its state untouched.
    pub async fn mount<S>(
        &self,
        store: &S,
        path: &str,
        scope: &ComponentScope,
    ) -> Option<LayoutOutcome>
    where
        S: SessionStore + ?Sized,
    {
        if self.routes.classify(path) != RouteClass::ProtectedAdmin {
            return Some(LayoutOutcome::Skipped);
        }

        let session = scope.run(store.get_session()).await?;
        let outcome = match session {
            Ok(Some(session)) => LayoutOutcome::Authenticated {
                email: session.user.email,
            },
            Ok(None) => LayoutOutcome::RedirectToLogin(self.routes.login_redirect(path)),
            Err(e) => {
                tracing::warn!(path, "Layout session check failed: {}", e);
                LayoutOutcome::RedirectToLogin(self.routes.login_redirect(path))
            }
        };
        Some(outcome)
    }
}
