//! Test doubles shared by the unit tests of this crate.
//!
//! `MockAuthBackend` stands in for the hosted auth service behind a
//! `CachedSessionStore`; `ScriptedSessionStore` and `FailingSessionStore`
//! replace the session store adapter entirely.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use crate::route::AdminRoutes;
use crate::session::{Session, SessionError, SessionUser, SignInOptions};
use crate::store::{AuthBackend, SessionStore, StoreError};
use crate::utils::now_epoch;

pub(crate) const TEST_EMAIL: &str = "admin@tefipay.com";

/// Session for the test admin expiring `secs` seconds from now
pub(crate) fn session_expiring_in(secs: i64) -> Session {
    Session {
        access_token: "test-access-token".to_string(),
        refresh_token: "test-refresh-token".to_string(),
        expires_at: now_epoch() + secs,
        user: SessionUser {
            id: "user-1".to_string(),
            email: Some(TEST_EMAIL.to_string()),
        },
    }
}

pub(crate) fn test_routes() -> AdminRoutes {
    AdminRoutes {
        prefix: "/admin".to_string(),
        login: "/admin/login".to_string(),
        setup: "/admin/setup-admin".to_string(),
        landing: "/admin/dashboard".to_string(),
    }
}

/// In-process stand-in for the auth service
#[derive(Default)]
pub(crate) struct MockAuthBackend {
    refresh_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    last_expires_in: AtomicI64,
    refresh_error: Mutex<Option<StoreError>>,
    sign_in_error: Mutex<Option<StoreError>>,
    sign_out_error: Mutex<Option<StoreError>>,
}

impl MockAuthBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_refresh_with(&self, err: StoreError) {
        *self.refresh_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn fail_sign_in_with(&self, err: StoreError) {
        *self.sign_in_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn fail_sign_out_with(&self, err: StoreError) {
        *self.sign_out_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_expires_in(&self) -> Option<i64> {
        match self.last_expires_in.load(Ordering::SeqCst) {
            0 => None,
            secs => Some(secs),
        }
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
        options: SignInOptions,
    ) -> Result<Session, StoreError> {
        self.last_expires_in
            .store(options.expires_in, Ordering::SeqCst);
        if let Some(err) = self.sign_in_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut session = session_expiring_in(options.expires_in);
        session.user.email = Some(email.to_string());
        Ok(session)
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, StoreError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.refresh_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(session_expiring_in(7200))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), StoreError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.sign_out_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(())
    }
}

/// Store whose every operation fails as if the auth service were unreachable
pub(crate) struct FailingSessionStore;

fn unreachable_error() -> SessionError {
    SessionError::Store(StoreError::Network("auth service unreachable".to_string()))
}

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        Err(unreachable_error())
    }

    async fn refresh_session(&self) -> Result<Session, SessionError> {
        Err(unreachable_error())
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
        _options: SignInOptions,
    ) -> Result<Session, SessionError> {
        Err(unreachable_error())
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        Err(unreachable_error())
    }
}

/// Store driven directly by the test, with an optional delay on every call
pub(crate) struct ScriptedSessionStore {
    delay: Duration,
    session: Mutex<Option<Session>>,
    get_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    fail_get: AtomicBool,
    fail_refresh: AtomicBool,
    fail_sign_out: AtomicBool,
}

impl ScriptedSessionStore {
    pub(crate) fn new(session: Option<Session>) -> Self {
        Self {
            delay: Duration::ZERO,
            session: Mutex::new(session),
            get_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_refresh: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }

    pub(crate) fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_refresh(&self, fail: bool) {
        self.fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl SessionStore for ScriptedSessionStore {
    async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unreachable_error());
        }
        Ok(self.session.lock().unwrap().clone())
    }

    async fn refresh_session(&self) -> Result<Session, SessionError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(SessionError::Refresh("refresh token revoked".to_string()));
        }
        let renewed = session_expiring_in(7200);
        *self.session.lock().unwrap() = Some(renewed.clone());
        Ok(renewed)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
        options: SignInOptions,
    ) -> Result<Session, SessionError> {
        self.pause().await;
        let mut session = session_expiring_in(options.expires_in);
        session.user.email = Some(email.to_string());
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(SessionError::SignOut("auth service unavailable".to_string()));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
