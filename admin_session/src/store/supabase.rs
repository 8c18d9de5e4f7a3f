//! REST client for the hosted auth service (`/auth/v1`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::StoreError;
use super::types::AuthBackend;
use crate::session::{Session, SessionUser, SignInOptions};
use crate::utils::now_epoch;

/// Client for the auth endpoints of a Supabase project.
///
/// Constructed once at startup and shared through application state.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
}

#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshGrantRequest<'a> {
    refresh_token: &'a str,
}

/// Token response shared by the password and refresh grants.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    expires_at: Option<i64>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        let expires_at = self.expires_at.unwrap_or(now + self.expires_in);
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: SessionUser {
                id: self.user.id,
                email: self.user.email,
            },
        }
    }
}

fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .unwrap_or_else(|| body.to_string())
}

impl SupabaseAuthClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_url` - The project API URL (e.g., `https://xyz.supabase.co`)
    /// * `anon_key` - The anonymous API key
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.api_url, path)
    }

    async fn error_from_response(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        StoreError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        }
    }

    async fn token_grant<T: Serialize + ?Sized>(
        &self,
        grant_type: &str,
        body: &T,
    ) -> Result<TokenResponse, StoreError> {
        let url = self.auth_url(&format!("token?grant_type={grant_type}"));
        tracing::debug!(url = %url, "Requesting token");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response).await;
            tracing::warn!(grant_type, error = %err, "Token request failed");
            return Err(err);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuthClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
        options: SignInOptions,
    ) -> Result<Session, StoreError> {
        let token = self
            .token_grant("password", &PasswordGrantRequest { email, password })
            .await?;

        let now = now_epoch();
        let mut session = token.into_session(now);
        // The requested lifetime caps whatever the service granted
        session.expires_at = session.expires_at.min(now + options.expires_in);
        Ok(session)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, StoreError> {
        let token = self
            .token_grant("refresh_token", &RefreshGrantRequest { refresh_token })
            .await?;
        Ok(token.into_session(now_epoch()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let url = self.auth_url("logout");
        tracing::debug!(url = %url, "Signing out");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}
