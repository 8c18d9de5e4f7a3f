mod config;
mod cookie;
mod errors;
mod types;

pub use config::{
    SESSION_COOKIE_NAME, SESSION_COOKIE_SECURE, SESSION_EXPIRES_IN_SECS,
    SESSION_POLL_INTERVAL_SECS, SESSION_REFRESH_THRESHOLD_SECS,
};
pub use cookie::{
    clear_session_cookie_headers, decode_session_cookie, encode_session_cookie,
    get_session_cookie_from_headers, session_cookie_headers,
};
pub use errors::SessionError;
pub use types::{Session, SessionUser, SignInOptions};
