//! Shared helpers for the handler and middleware tests.
//!
//! `MockAuthBackend` stands in for the hosted auth service; requests carry
//! sessions in the same cookie format the real routes write.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use admin_session::{
    AuthBackend, SESSION_COOKIE_NAME, Session, SessionUser, SignInOptions, StoreError,
    encode_session_cookie, now_epoch,
};
use async_trait::async_trait;
use axum::response::Response;
use http::header::SET_COOKIE;

use crate::AuthState;

pub(crate) const TEST_EMAIL: &str = "admin@tefipay.com";
pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple";

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

/// `Cookie` request header value carrying `session`
pub(crate) fn cookie_header(session: &Session) -> String {
    format!(
        "{}={}",
        SESSION_COOKIE_NAME.as_str(),
        encode_session_cookie(session).unwrap()
    )
}

pub(crate) fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub(crate) async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub(crate) fn state_with(backend: Arc<MockAuthBackend>) -> AuthState {
    AuthState::new(backend)
}

#[derive(Default)]
pub(crate) struct MockAuthBackend {
    refresh_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    fail_refresh: AtomicBool,
    fail_sign_out: AtomicBool,
}

impl MockAuthBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_refresh(&self) {
        self.fail_refresh.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::SeqCst);
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        options: SignInOptions,
    ) -> Result<Session, StoreError> {
        if email != TEST_EMAIL || password != TEST_PASSWORD {
            return Err(StoreError::Api {
                status: 400,
                message: "Invalid login credentials".to_string(),
            });
        }
        Ok(session_expiring_in(options.expires_in))
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, StoreError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        Ok(session_expiring_in(7200))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), StoreError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        Ok(())
    }
}
