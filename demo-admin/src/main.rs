use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state};

use admin_session_axum::{
    AuthState, SESSION_COOKIE_SECURE, SupabaseAuthClient, admin_guard, admin_session_router,
};

mod handlers;
mod server;

use crate::server::{init_tracing, spawn_http_server};

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let supabase_url = std::env::var("SUPABASE_URL").map_err(|_| "SUPABASE_URL must be set")?;
    let anon_key =
        std::env::var("SUPABASE_ANON_KEY").map_err(|_| "SUPABASE_ANON_KEY must be set")?;
    let port = match std::env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    if let Some(warning) = plain_http_cookie_warning(*SESSION_COOKIE_SECURE) {
        tracing::warn!("{}", warning);
    }

    // One auth client for the whole process, shared through the router state
    let state = AuthState::new(Arc::new(SupabaseAuthClient::new(supabase_url, anon_key)));

    let app = Router::new()
        .merge(handlers::router(state.clone()))
        .merge(admin_session_router(state.clone()))
        .layer(from_fn_with_state(state, admin_guard));

    spawn_http_server(port, app).await?;
    Ok(())
}

/// This server speaks plain HTTP; browsers only send `Secure` cookies back to
/// localhost, so anywhere else sign-in appears to do nothing.
fn plain_http_cookie_warning(cookie_secure: bool) -> Option<&'static str> {
    cookie_secure.then_some(
        "Session cookie is marked Secure but this server speaks plain HTTP; \
         set ADMIN_COOKIE_SECURE=false unless it is reached on localhost or behind TLS",
    )
}
