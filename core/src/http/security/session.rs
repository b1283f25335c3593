//! Session storage for the form-login handshake.
//!
//! # Spring Security Equivalent
//! `HttpSessionSecurityContextRepository` + `HttpSessionRequestCache`
//!
//! Requires `actix_session::SessionMiddleware` to wrap the security
//! middleware so the session is loaded before authentication runs.

use actix_session::Session;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Session fixation protection on login.
///
/// # Spring Equivalent
/// `sessionFixation().migrateSession()` / `.none()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFixationStrategy {
    /// Issue a new session id, keeping the session state.
    #[default]
    MigrateSession,
    /// Keep the session id. Only for tests.
    None,
}

/// Minimal serialisable principal kept in the session.
///
/// Roles are re-read from the identity set on every request; only the
/// username is authoritative here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    user_key: String,
    saved_request_key: String,
    fixation_strategy: SessionFixationStrategy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        SessionConfig {
            user_key: "security_user".to_string(),
            saved_request_key: "security_saved_request".to_string(),
            fixation_strategy: SessionFixationStrategy::MigrateSession,
        }
    }

    pub fn user_key(mut self, key: &str) -> Self {
        self.user_key = key.to_string();
        self
    }

    pub fn saved_request_key(mut self, key: &str) -> Self {
        self.saved_request_key = key.to_string();
        self
    }

    pub fn fixation_strategy(mut self, strategy: SessionFixationStrategy) -> Self {
        self.fixation_strategy = strategy;
        self
    }

    pub fn get_user_key(&self) -> &str {
        &self.user_key
    }

    pub fn get_saved_request_key(&self) -> &str {
        &self.saved_request_key
    }

    pub fn get_fixation_strategy(&self) -> SessionFixationStrategy {
        self.fixation_strategy
    }
}

#[derive(Debug, Display, Error)]
pub enum SessionError {
    #[display("failed to write session attribute '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Session operations used by the form-login flow and the authenticator.
pub struct SessionAuthenticator;

impl SessionAuthenticator {
    /// Stores the principal, applying session fixation protection first.
    pub fn login(
        session: &Session,
        username: &str,
        config: &SessionConfig,
    ) -> Result<(), SessionError> {
        if config.fixation_strategy == SessionFixationStrategy::MigrateSession {
            session.renew();
        }
        session
            .insert(
                &config.user_key,
                SessionUser {
                    username: username.to_string(),
                },
            )
            .map_err(|e| SessionError::Write {
                key: config.user_key.clone(),
                reason: e.to_string(),
            })
    }

    /// Drops everything, including the session cookie.
    pub fn logout(session: &Session) {
        session.purge();
    }

    pub fn get_session_user(session: &Session, config: &SessionConfig) -> Option<SessionUser> {
        session.get::<SessionUser>(&config.user_key).ok().flatten()
    }

    /// Remembers where an anonymous request was headed before the login redirect.
    pub fn save_request(
        session: &Session,
        url: &str,
        config: &SessionConfig,
    ) -> Result<(), SessionError> {
        session
            .insert(&config.saved_request_key, url)
            .map_err(|e| SessionError::Write {
                key: config.saved_request_key.clone(),
                reason: e.to_string(),
            })
    }

    /// Returns and clears the saved request URL, or `default_url`.
    pub fn take_saved_request(
        session: &Session,
        config: &SessionConfig,
        default_url: &str,
    ) -> String {
        session
            .remove_as::<String>(&config.saved_request_key)
            .and_then(Result::ok)
            .unwrap_or_else(|| default_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::{SessionExt, SessionStatus};
    use actix_web::test::TestRequest;

    fn session() -> Session {
        TestRequest::default().to_srv_request().get_session()
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::new();

        assert_eq!(config.get_user_key(), "security_user");
        assert_eq!(config.get_saved_request_key(), "security_saved_request");
        assert_eq!(
            config.get_fixation_strategy(),
            SessionFixationStrategy::MigrateSession
        );
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new()
            .user_key("principal")
            .saved_request_key("target")
            .fixation_strategy(SessionFixationStrategy::None);

        assert_eq!(config.get_user_key(), "principal");
        assert_eq!(config.get_saved_request_key(), "target");
        assert_eq!(config.get_fixation_strategy(), SessionFixationStrategy::None);
    }

    #[test]
    fn test_session_user_serialization() {
        let user = SessionUser {
            username: "admin".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        let back: SessionUser = serde_json::from_str(&json).unwrap();

        assert_eq!(back, user);
        assert!(!json.contains("12345"));
    }

    #[test]
    fn test_login_renews_session_id() {
        let session = session();
        let config = SessionConfig::new();

        SessionAuthenticator::login(&session, "admin", &config).unwrap();

        assert_eq!(session.status(), SessionStatus::Renewed);
        assert_eq!(
            SessionAuthenticator::get_session_user(&session, &config),
            Some(SessionUser {
                username: "admin".to_string()
            })
        );
    }

    #[test]
    fn test_login_without_fixation_protection_keeps_session_id() {
        let session = session();
        let config = SessionConfig::new().fixation_strategy(SessionFixationStrategy::None);

        SessionAuthenticator::login(&session, "user", &config).unwrap();

        assert_eq!(session.status(), SessionStatus::Changed);
    }

    #[test]
    fn test_logout_purges_principal() {
        let session = session();
        let config = SessionConfig::new();
        SessionAuthenticator::login(&session, "admin", &config).unwrap();

        SessionAuthenticator::logout(&session);

        assert_eq!(session.status(), SessionStatus::Purged);
        assert!(SessionAuthenticator::get_session_user(&session, &config).is_none());
    }

    #[test]
    fn test_saved_request_is_taken_once() {
        let session = session();
        let config = SessionConfig::new();
        SessionAuthenticator::save_request(&session, "/myAccount?tab=1", &config).unwrap();

        assert_eq!(
            SessionAuthenticator::take_saved_request(&session, &config, "/"),
            "/myAccount?tab=1"
        );
        assert_eq!(SessionAuthenticator::take_saved_request(&session, &config, "/"), "/");
    }
}
