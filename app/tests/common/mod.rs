//! Common test utilities.
//!
//! The test app is wired the same way `main` wires the server: the session
//! middleware outermost, the security middleware on the root scope.

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use base64::prelude::*;

use bank_security_app::handlers;
use bank_security_app::security_config::project_security_config;
use bank_security_core::http::security::{form_login, SecurityPolicy, SecuritySettings};

/// Settings with the slashless patterns written as absolute paths.
pub const CORRECTED_SETTINGS: &str = r#"
[[rules]]
patterns = ["/myAccount", "/myLoans", "/myBalance", "/myCards"]
access = "authenticated"

[[rules]]
patterns = ["/notices", "/contact"]
access = "public"
"#;

/// Helper function to create Basic Auth header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64_STANDARD.encode(credentials))
}

pub fn corrected_policy() -> SecurityPolicy {
    let settings = SecuritySettings::from_toml_str(CORRECTED_SETTINGS).unwrap();
    SecurityPolicy::from_settings(&settings).unwrap()
}

/// Session cookie set by a response, if any.
pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

pub fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// App secured by the project's declared policy.
pub async fn create_test_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    create_app_with_policy(project_security_config().unwrap()).await
}

pub async fn create_app_with_policy(
    policy: SecurityPolicy,
) -> impl actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let login = policy.form_login_service();
    test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .service(
                web::scope("")
                    .wrap(policy.transform())
                    .configure(|cfg| {
                        if let Some(service) = login {
                            form_login::configure(service)(cfg);
                        }
                    })
                    .configure(handlers::routes),
            ),
    )
    .await
}
