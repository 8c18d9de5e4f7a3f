use std::sync::Arc;

use admin_session::{AuthBackend, CachedSessionStore, SessionGuard};
use http::HeaderMap;

/// Shared state of the admin routes and the guard middleware.
///
/// Holds the auth service client constructed at startup; every request
/// builds its own session store on top of it.
#[derive(Clone)]
pub struct AuthState {
    backend: Arc<dyn AuthBackend>,
    guard: Arc<SessionGuard>,
}

pub(crate) type RequestSessionStore = CachedSessionStore<dyn AuthBackend>;

impl AuthState {
    /// State using the environment-configured admin routes
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self::with_guard(backend, SessionGuard::default())
    }

    pub fn with_guard(backend: Arc<dyn AuthBackend>, guard: SessionGuard) -> Self {
        Self {
            backend,
            guard: Arc::new(guard),
        }
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Session store seeded from the request cookie
    pub(crate) fn request_store(&self, headers: &HeaderMap) -> RequestSessionStore {
        CachedSessionStore::from_headers(self.backend.clone(), headers)
    }

    /// Session store with nobody signed in
    pub(crate) fn empty_store(&self) -> RequestSessionStore {
        CachedSessionStore::new(self.backend.clone())
    }
}
