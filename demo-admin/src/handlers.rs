use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use admin_session_axum::{
    ADMIN_LOGIN_URL, ADMIN_SESSION_EXTEND_URL, ADMIN_SESSION_STATUS_URL, ADMIN_SIGNOUT_URL,
    AdminUser, AuthState, SESSION_POLL_INTERVAL_SECS,
};

#[derive(Template)]
#[template(path = "admin_page.j2", escape = "html")]
struct AdminPageTemplate<'a> {
    title: &'a str,
    body: &'a str,
    email: &'a str,
    signout_url: &'a str,
    status_url: &'a str,
    extend_url: &'a str,
    poll_interval_ms: u64,
}

#[derive(Template)]
#[template(path = "index.j2", escape = "html")]
struct IndexTemplate<'a> {
    email: Option<&'a str>,
    login_url: &'a str,
}

#[derive(Template)]
#[template(path = "setup_admin.j2", escape = "html")]
struct SetupAdminTemplate<'a> {
    login_url: &'a str,
}

pub(crate) fn router(state: AuthState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/admin", get(dashboard))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/waitlist", get(waitlist))
        .route("/admin/contact-submissions", get(contact_submissions))
        .route("/admin/blog", get(blog))
        .route("/admin/setup-admin", get(setup_admin))
        .with_state(state)
}

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

fn admin_page(user: &AdminUser, title: &str, body: &str) -> Response {
    render(AdminPageTemplate {
        title,
        body,
        email: user.email.as_deref().unwrap_or_default(),
        signout_url: ADMIN_SIGNOUT_URL.as_str(),
        status_url: ADMIN_SESSION_STATUS_URL.as_str(),
        extend_url: ADMIN_SESSION_EXTEND_URL.as_str(),
        poll_interval_ms: *SESSION_POLL_INTERVAL_SECS * 1000,
    })
}

async fn index(user: Option<AdminUser>) -> Response {
    render(IndexTemplate {
        email: user.as_ref().and_then(|u| u.email.as_deref()),
        login_url: ADMIN_LOGIN_URL.as_str(),
    })
}

async fn dashboard(user: AdminUser) -> Response {
    admin_page(&user, "Dashboard", "Welcome to the admin area.")
}

async fn waitlist(user: AdminUser) -> Response {
    admin_page(&user, "Waitlist", "Waitlist signups are listed here.")
}

async fn contact_submissions(user: AdminUser) -> Response {
    admin_page(
        &user,
        "Contact Submissions",
        "Messages sent through the contact form are listed here.",
    )
}

async fn blog(user: AdminUser) -> Response {
    admin_page(&user, "Blog", "Blog posts are managed here.")
}

async fn setup_admin() -> Response {
    render(SetupAdminTemplate {
        login_url: ADMIN_LOGIN_URL.as_str(),
    })
}
