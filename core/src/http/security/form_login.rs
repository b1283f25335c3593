//! Form-based login.
//!
//! # Spring Security Equivalent
//! `HttpSecurity.formLogin(withDefaults())`: a generated login page at
//! `GET /login`, credentials posted to `POST /login`, logout at `POST /logout`.
//!
//! # Example
//! ```rust,ignore
//! let service = FormLoginService::new(authenticator, FormLoginConfig::new(), SessionConfig::new());
//!
//! App::new()
//!     .configure(form_login::configure(service))
//!     .wrap(security_transform)
//!     .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
//! ```

use actix_session::Session;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::http::security::authenticator::MemoryAuthenticator;
use crate::http::security::session::{SessionAuthenticator, SessionConfig};

#[derive(Clone, Debug)]
pub struct FormLoginConfig {
    /// URL of the login page (GET)
    login_page: String,
    /// URL that processes the login form (POST)
    login_processing_url: String,
    /// Where to go after login when no request was saved
    default_success_url: String,
    failure_url: String,
    /// URL for logout (POST)
    logout_url: String,
    logout_success_url: String,
}

impl Default for FormLoginConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FormLoginConfig {
    /// Spring's defaults.
    pub fn new() -> Self {
        FormLoginConfig {
            login_page: "/login".to_string(),
            login_processing_url: "/login".to_string(),
            default_success_url: "/".to_string(),
            failure_url: "/login?error".to_string(),
            logout_url: "/logout".to_string(),
            logout_success_url: "/login?logout".to_string(),
        }
    }

    pub fn login_page(mut self, url: &str) -> Self {
        self.login_page = url.to_string();
        self
    }

    pub fn login_processing_url(mut self, url: &str) -> Self {
        self.login_processing_url = url.to_string();
        self
    }

    pub fn default_success_url(mut self, url: &str) -> Self {
        self.default_success_url = url.to_string();
        self
    }

    pub fn failure_url(mut self, url: &str) -> Self {
        self.failure_url = url.to_string();
        self
    }

    pub fn logout_url(mut self, url: &str) -> Self {
        self.logout_url = url.to_string();
        self
    }

    pub fn logout_success_url(mut self, url: &str) -> Self {
        self.logout_success_url = url.to_string();
        self
    }

    pub fn get_login_page(&self) -> &str {
        &self.login_page
    }

    pub fn get_login_processing_url(&self) -> &str {
        &self.login_processing_url
    }

    pub fn get_default_success_url(&self) -> &str {
        &self.default_success_url
    }

    pub fn get_failure_url(&self) -> &str {
        &self.failure_url
    }

    pub fn get_logout_url(&self) -> &str {
        &self.logout_url
    }

    pub fn get_logout_success_url(&self) -> &str {
        &self.logout_success_url
    }
}

/// Posted login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Verifies posted credentials and keeps the principal in the session.
#[derive(Clone)]
pub struct FormLoginService {
    authenticator: MemoryAuthenticator,
    config: FormLoginConfig,
    session_config: SessionConfig,
}

impl FormLoginService {
    pub fn new(
        authenticator: MemoryAuthenticator,
        config: FormLoginConfig,
        session_config: SessionConfig,
    ) -> Self {
        FormLoginService {
            authenticator,
            config,
            session_config,
        }
    }

    pub fn config(&self) -> &FormLoginConfig {
        &self.config
    }

    /// Redirects to the saved request (or the default success URL) on
    /// success, to the failure URL otherwise.
    pub fn attempt_authentication(
        &self,
        session: &Session,
        username: &str,
        password: &str,
    ) -> HttpResponse {
        let user = match self.authenticator.verify_credentials(username, password) {
            Ok(user) => user,
            Err(e) => {
                log::info!("form login failed for '{}': {}", username, e);
                return redirect(&self.config.failure_url);
            }
        };

        let target = SessionAuthenticator::take_saved_request(
            session,
            &self.session_config,
            &self.config.default_success_url,
        );
        if let Err(e) =
            SessionAuthenticator::login(session, user.get_username(), &self.session_config)
        {
            log::error!("form login for '{}' could not be stored: {}", username, e);
            return redirect(&self.config.failure_url);
        }

        log::info!("form login succeeded for '{}'", user.get_username());
        redirect(&target)
    }

    pub fn logout(&self, session: &Session) -> HttpResponse {
        SessionAuthenticator::logout(session);
        redirect(&self.config.logout_success_url)
    }

    /// Default generated login page.
    pub fn render_login_page(&self, query: &str) -> HttpResponse {
        let notice = if query.split('&').any(|p| p == "error") {
            r#"<p class="error">Bad credentials</p>"#
        } else if query.split('&').any(|p| p == "logout") {
            r#"<p class="info">You have been signed out</p>"#
        } else {
            ""
        };

        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head><title>Please sign in</title></head>
<body>
    <h2>Please sign in</h2>
    {notice}
    <form method="post" action="{action}">
        <p><label for="username">Username</label>
        <input type="text" id="username" name="username" required autofocus></p>
        <p><label for="password">Password</label>
        <input type="password" id="password" name="password" required></p>
        <button type="submit">Sign in</button>
    </form>
</body>
</html>"#,
            notice = notice,
            action = self.config.login_processing_url,
        );

        HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body)
    }
}

fn redirect(url: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, url.to_string()))
        .finish()
}

async fn login_page(req: HttpRequest, service: web::Data<FormLoginService>) -> HttpResponse {
    service.render_login_page(req.query_string())
}

async fn login(
    session: Session,
    form: web::Form<LoginForm>,
    service: web::Data<FormLoginService>,
) -> HttpResponse {
    service.attempt_authentication(&session, &form.username, &form.password)
}

async fn logout(session: Session, service: web::Data<FormLoginService>) -> HttpResponse {
    service.logout(&session)
}

/// Registers the login page, login processing and logout routes.
pub fn configure(service: FormLoginService) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let config = service.config.clone();
        cfg.app_data(web::Data::new(service))
            .route(config.get_login_page(), web::get().to(login_page))
            .route(config.get_login_processing_url(), web::post().to(login))
            .route(config.get_logout_url(), web::post().to(logout));
    }
}
