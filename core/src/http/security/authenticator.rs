//! In-memory authentication.
//!
//! # Spring Security Equivalent
//! `DaoAuthenticationProvider` over an `InMemoryUserDetailsManager`

use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::dev::ServiceRequest;

use crate::http::error::AuthError;
use crate::http::security::config::{Authentication, Authenticator};
use crate::http::security::crypto::PasswordEncoder;
use crate::http::security::http_basic::extract_basic_credentials;
use crate::http::security::identities::InMemoryIdentities;
use crate::http::security::session::{SessionAuthenticator, SessionConfig};
use crate::http::security::user::User;

/// Resolves the caller from HTTP Basic credentials, then from the form-login
/// session.
///
/// Cheap to clone: the identity set and encoder are shared.
#[derive(Clone)]
pub struct MemoryAuthenticator {
    identities: Arc<InMemoryIdentities>,
    password_encoder: Arc<dyn PasswordEncoder>,
    session: Option<SessionConfig>,
}

impl MemoryAuthenticator {
    pub fn new(
        identities: Arc<InMemoryIdentities>,
        password_encoder: Arc<dyn PasswordEncoder>,
    ) -> Self {
        MemoryAuthenticator {
            identities,
            password_encoder,
            session: None,
        }
    }

    /// Also accept principals stored in the session by form login.
    pub fn with_session(mut self, config: SessionConfig) -> Self {
        self.session = Some(config);
        self
    }

    /// Checks a username/password pair against the identity set.
    ///
    /// Unknown user and wrong password are reported the same way.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .identities
            .find(username)
            .ok_or(AuthError::BadCredentials)?;
        if self.password_encoder.matches(password, user.get_password()) {
            Ok(user.erase_credentials())
        } else {
            Err(AuthError::BadCredentials)
        }
    }

    fn session_user(&self, req: &ServiceRequest) -> Option<User> {
        let config = self.session.as_ref()?;
        let principal = SessionAuthenticator::get_session_user(&req.get_session(), config)?;
        // The identity set is the source of truth for roles.
        self.identities
            .find(&principal.username)
            .map(User::erase_credentials)
    }
}

impl Authenticator for MemoryAuthenticator {
    /// Presented Basic credentials take precedence over the session; when
    /// they fail the session is not consulted.
    fn authenticate(&self, req: &ServiceRequest) -> Authentication {
        if let Some(creds) = extract_basic_credentials(req.headers()) {
            return match self.verify_credentials(&creds.username, &creds.password) {
                Ok(user) => Authentication::Authenticated(user),
                Err(e) => {
                    log::info!(
                        "basic authentication failed for '{}' on {}: {}",
                        creds.username,
                        req.path(),
                        e
                    );
                    Authentication::Failed
                }
            };
        }

        match self.session_user(req) {
            Some(user) => Authentication::Authenticated(user),
            None => Authentication::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::security::crypto::NoOpPasswordEncoder;
    use actix_web::test::TestRequest;
    use base64::prelude::*;

    fn authenticator() -> MemoryAuthenticator {
        let identities = InMemoryIdentities::new(vec![
            User::with_username("admin").password("12345").roles(&["admin"]),
            User::with_username("user").password("12345").roles(&["read"]),
        ])
        .unwrap();
        MemoryAuthenticator::new(Arc::new(identities), Arc::new(NoOpPasswordEncoder))
    }

    fn basic(username: &str, password: &str) -> String {
        format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{}:{}", username, password))
        )
    }

    #[test]
    fn test_verify_credentials() {
        let auth = authenticator();

        let admin = auth.verify_credentials("admin", "12345").unwrap();
        assert_eq!(admin.get_username(), "admin");
        assert_eq!(admin.get_roles(), &["admin".to_string()]);
        assert_eq!(admin.get_password(), "");

        assert_eq!(
            auth.verify_credentials("admin", "1234"),
            Err(AuthError::BadCredentials)
        );
        assert_eq!(
            auth.verify_credentials("nobody", "12345"),
            Err(AuthError::BadCredentials)
        );
    }

    #[test]
    fn test_authenticate_from_basic_header() {
        let req = TestRequest::get()
            .uri("/myAccount")
            .insert_header(("Authorization", basic("user", "12345")))
            .to_srv_request();

        let authentication = authenticator().authenticate(&req);
        assert!(authentication.user().unwrap().has_role("read"));
    }

    #[test]
    fn test_bad_basic_credentials_fail() {
        let req = TestRequest::get()
            .uri("/myAccount")
            .insert_header(("Authorization", basic("admin", "wrong")))
            .to_srv_request();

        assert_eq!(authenticator().authenticate(&req), Authentication::Failed);
    }

    #[test]
    fn test_no_credentials() {
        let req = TestRequest::get().uri("/myAccount").to_srv_request();
        assert_eq!(authenticator().authenticate(&req), Authentication::Anonymous);
    }
}
