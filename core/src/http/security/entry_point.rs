//! Authentication entry point: how an anonymous request to a protected path
//! gets challenged.
//!
//! # Spring Security Equivalent
//! `DelegatingAuthenticationEntryPoint` over
//! `LoginUrlAuthenticationEntryPoint` and `BasicAuthenticationEntryPoint`

use actix_session::SessionExt;
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{self, HeaderMap};
use actix_web::HttpResponse;
use serde::Deserialize;

use crate::http::error::ConfigError;
use crate::http::security::form_login::FormLoginConfig;
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::session::{SessionAuthenticator, SessionConfig};

/// Which challenge fires when both handshakes are enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengePolicy {
    /// Always `401` + `WWW-Authenticate: Basic`.
    Basic,
    /// Always redirect to the login page.
    Form,
    /// Browsers (`Accept: text/html`) get the login page, everything else
    /// (including `X-Requested-With: XMLHttpRequest`) gets Basic.
    #[default]
    Negotiate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeMode {
    Basic,
    Form,
}

#[derive(Clone, Debug)]
pub struct AuthenticationEntryPoint {
    form_login: Option<FormLoginConfig>,
    http_basic: Option<HttpBasicConfig>,
    policy: ChallengePolicy,
    session: SessionConfig,
}

impl AuthenticationEntryPoint {
    /// At least one of the two handshakes must be enabled.
    pub fn new(
        form_login: Option<FormLoginConfig>,
        http_basic: Option<HttpBasicConfig>,
        policy: ChallengePolicy,
        session: SessionConfig,
    ) -> Result<Self, ConfigError> {
        if form_login.is_none() && http_basic.is_none() {
            return Err(ConfigError::NoHandshakeMode);
        }
        Ok(AuthenticationEntryPoint {
            form_login,
            http_basic,
            policy,
            session,
        })
    }

    pub fn form_login(&self) -> Option<&FormLoginConfig> {
        self.form_login.as_ref()
    }

    pub fn http_basic(&self) -> Option<&HttpBasicConfig> {
        self.http_basic.as_ref()
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session
    }

    /// Login page and login processing URL stay reachable without credentials.
    pub fn is_login_path(&self, path: &str) -> bool {
        self.form_login
            .as_ref()
            .is_some_and(|f| path == f.get_login_page() || path == f.get_login_processing_url())
    }

    /// Picks the handshake to challenge with, based on the request headers.
    pub fn select_mode(&self, headers: &HeaderMap) -> HandshakeMode {
        match (&self.form_login, &self.http_basic) {
            (Some(_), None) => return HandshakeMode::Form,
            (None, Some(_)) => return HandshakeMode::Basic,
            _ => {}
        }

        match self.policy {
            ChallengePolicy::Basic => HandshakeMode::Basic,
            ChallengePolicy::Form => HandshakeMode::Form,
            ChallengePolicy::Negotiate => {
                if is_xhr(headers) {
                    HandshakeMode::Basic
                } else if accepts_html(headers) {
                    HandshakeMode::Form
                } else {
                    HandshakeMode::Basic
                }
            }
        }
    }

    /// Builds the challenge response for an anonymous request.
    pub fn challenge(&self, req: &ServiceRequest) -> HttpResponse {
        match (self.select_mode(req.headers()), &self.form_login) {
            (HandshakeMode::Form, Some(form)) => {
                let target = match req.query_string() {
                    "" => req.path().to_string(),
                    q => format!("{}?{}", req.path(), q),
                };
                if let Err(e) =
                    SessionAuthenticator::save_request(&req.get_session(), &target, &self.session)
                {
                    log::warn!("could not save request before login redirect: {}", e);
                }
                log::debug!("redirecting {} to {}", target, form.get_login_page());
                HttpResponse::Found()
                    .append_header((header::LOCATION, form.get_login_page()))
                    .finish()
            }
            _ => self.basic_challenge(req),
        }
    }

    /// `401` with the Basic realm, whatever the request accepts. Used when
    /// presented Basic credentials were rejected.
    pub fn basic_challenge(&self, req: &ServiceRequest) -> HttpResponse {
        log::debug!("basic challenge for {}", req.path());
        match &self.http_basic {
            Some(basic) => HttpResponse::Unauthorized()
                .append_header((header::WWW_AUTHENTICATE, basic.www_authenticate_header()))
                .finish(),
            None => HttpResponse::Unauthorized().finish(),
        }
    }
}

fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("X-Requested-With")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}
