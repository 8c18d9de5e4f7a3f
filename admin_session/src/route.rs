//! Classification of request paths against the admin route set

use crate::config::{
    ADMIN_LANDING_URL, ADMIN_LOGIN_URL, ADMIN_ROUTE_PREFIX, ADMIN_SETUP_URL, RETURN_TO_PARAM,
};

/// Every path belongs to exactly one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Outside the admin prefix, never guarded
    NonAdmin,
    /// The login page itself
    LoginPage,
    /// Admin pages reachable without a session (login sub-paths, account bootstrap)
    PublicAdmin,
    /// Everything else under the admin prefix
    ProtectedAdmin,
}

/// The admin route layout the guard enforces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRoutes {
    pub prefix: String,
    pub login: String,
    pub setup: String,
    pub landing: String,
}

impl Default for AdminRoutes {
    fn default() -> Self {
        Self {
            prefix: ADMIN_ROUTE_PREFIX.clone(),
            login: ADMIN_LOGIN_URL.clone(),
            setup: ADMIN_SETUP_URL.clone(),
            landing: ADMIN_LANDING_URL.clone(),
        }
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// `path` equals `base` or lies below it on a segment boundary
fn is_under(path: &str, base: &str) -> bool {
    path == base
        || path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl AdminRoutes {
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = trim_trailing_slash(path);

        if !is_under(path, &self.prefix) {
            RouteClass::NonAdmin
        } else if path == self.login {
            RouteClass::LoginPage
        } else if is_under(path, &self.login) || is_under(path, &self.setup) {
            RouteClass::PublicAdmin
        } else {
            RouteClass::ProtectedAdmin
        }
    }

    /// Login URL carrying `from` as the return target
    pub fn login_redirect(&self, from: &str) -> String {
        format!(
            "{}?{}={}",
            self.login,
            RETURN_TO_PARAM,
            urlencoding::encode(from)
        )
    }

    /// Where to send a user after sign-in.
    ///
    /// Only local absolute paths are honoured; anything else, and the login
    /// page itself, falls back to the landing page.
    pub fn return_target(&self, from: Option<&str>) -> String {
        match from {
            Some(target)
                if target.starts_with('/')
                    && !target.starts_with("//")
                    && !target.contains('\\')
                    && self.classify(target.split('?').next().unwrap_or(target))
                        != RouteClass::LoginPage =>
            {
                target.to_string()
            }
            _ => self.landing.clone(),
        }
    }
}
