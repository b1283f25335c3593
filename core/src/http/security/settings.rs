//! Externalised policy settings.
//!
//! Defaults reproduce the project's declared policy exactly, including its
//! relative `myLoans`/`notices`/... patterns and the plaintext encoder. A TOML
//! file and `BANK_SECURITY__*` environment variables override them.
//!
//! ```toml
//! password_encoder = "argon2"
//! challenge = "negotiate"
//! any_request = "authenticated"
//!
//! [[rules]]
//! patterns = ["/myAccount", "/myLoans", "/myBalance", "/myCards"]
//! access = "authenticated"
//!
//! [[rules]]
//! patterns = ["/notices", "/contact"]
//! access = "public"
//!
//! [[users]]
//! username = "admin"
//! password = "$argon2id$v=19$..."
//! roles = ["admin"]
//! ```

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::http::error::ConfigError;
use crate::http::security::authorizer::{Access, PatternKind, RuleSet};
use crate::http::security::crypto::PasswordEncoderKind;
use crate::http::security::entry_point::ChallengePolicy;
use crate::http::security::form_login::FormLoginConfig;
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::policy::SecurityPolicy;
use crate::http::security::user::User;

pub const ENV_PREFIX: &str = "BANK_SECURITY";

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    pub patterns: Vec<String>,
    pub access: Access,
    #[serde(default)]
    pub kind: PatternKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSettings {
    pub username: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub rules: Vec<RuleSettings>,
    /// Requirement for paths no rule matches.
    pub any_request: Access,
    pub users: Vec<UserSettings>,
    pub password_encoder: PasswordEncoderKind,
    pub form_login: bool,
    pub http_basic: bool,
    pub realm: String,
    pub challenge: ChallengePolicy,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        let rule = |patterns: &[&str], access| RuleSettings {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            access,
            kind: PatternKind::Ant,
        };
        let user = |username: &str, roles: &[&str]| UserSettings {
            username: username.to_string(),
            password: "12345".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };

        SecuritySettings {
            rules: vec![
                rule(
                    &["/myAccount", "myLoans", "myBalance", "myCards"],
                    Access::Authenticated,
                ),
                rule(&["notices", "contact"], Access::Public),
            ],
            any_request: Access::Authenticated,
            users: vec![user("admin", &["admin"]), user("user", &["read"])],
            password_encoder: PasswordEncoderKind::NoOp,
            form_login: true,
            http_basic: true,
            realm: "Realm".to_string(),
            challenge: ChallengePolicy::Negotiate,
        }
    }
}

impl SecuritySettings {
    /// Defaults, then the optional file, then environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

impl SecurityPolicy {
    pub fn from_settings(settings: &SecuritySettings) -> Result<Self, ConfigError> {
        let mut rules = RuleSet::builder().any_request(settings.any_request);
        for rule in &settings.rules {
            let patterns: Vec<&str> = rule.patterns.iter().map(String::as_str).collect();
            rules = match rule.kind {
                PatternKind::Ant => rules.request_matchers(&patterns, rule.access),
                PatternKind::Regex => rules.regex_matchers(&patterns, rule.access),
            };
        }

        let users = settings
            .users
            .iter()
            .map(|u| {
                let roles: Vec<&str> = u.roles.iter().map(String::as_str).collect();
                User::with_username(&u.username)
                    .password(&u.password)
                    .roles(&roles)
            })
            .collect();

        let mut http = SecurityPolicy::builder()
            .authorize_http_requests(rules)
            .challenge_policy(settings.challenge)
            .user_details(users)
            .password_encoder_arc(settings.password_encoder.build()?.into());
        if settings.form_login {
            http = http.form_login(FormLoginConfig::new());
        }
        if settings.http_basic {
            http = http.http_basic(HttpBasicConfig::new().realm(&settings.realm));
        }
        http.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_declared_policy() {
        let policy = SecurityPolicy::from_settings(&SecuritySettings::default()).unwrap();

        assert_eq!(policy.evaluate("/myAccount"), Access::Authenticated);
        assert!(policy.rules().find("/notices").is_none());
        assert_eq!(policy.identities().iter().count(), 2);
        assert_eq!(policy.password_encoder().name(), "noop");
        assert!(policy.entry_point().form_login().is_some());
        assert!(policy.entry_point().http_basic().is_some());
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings = SecuritySettings::from_toml_str("").unwrap();

        assert_eq!(settings.rules.len(), 2);
        assert_eq!(settings.users.len(), 2);
        assert_eq!(settings.password_encoder, PasswordEncoderKind::NoOp);
        assert_eq!(settings.challenge, ChallengePolicy::Negotiate);
    }

    #[test]
    fn test_toml_overrides() {
        let settings = SecuritySettings::from_toml_str(
            r#"
            any_request = "public"
            challenge = "basic"
            form_login = false
            realm = "Bank"

            [[rules]]
            patterns = ["/myAccount", "/myLoans"]
            access = "authenticated"

            [[rules]]
            patterns = ["/notices.*"]
            access = "public"
            kind = "regex"

            [[users]]
            username = "teller"
            password = "s3cret"
            roles = ["read"]
            "#,
        )
        .unwrap();

        let policy = SecurityPolicy::from_settings(&settings).unwrap();

        assert_eq!(policy.evaluate("/myLoans"), Access::Authenticated);
        assert_eq!(policy.evaluate("/notices/today"), Access::Public);
        assert_eq!(policy.evaluate("/elsewhere"), Access::Public);
        assert!(policy.find_user("teller").is_some());
        assert!(policy.find_user("admin").is_none());
        assert!(policy.entry_point().form_login().is_none());
        assert_eq!(
            policy.entry_point().http_basic().unwrap().get_realm(),
            "Bank"
        );
    }

    #[test]
    fn test_duplicate_users_in_settings_fail() {
        let settings = SecuritySettings::from_toml_str(
            r#"
            [[users]]
            username = "admin"
            password = "a"
            roles = ["admin"]

            [[users]]
            username = "admin"
            password = "b"
            roles = ["read"]
            "#,
        )
        .unwrap();

        assert!(matches!(
            SecurityPolicy::from_settings(&settings),
            Err(ConfigError::DuplicateUsername { .. })
        ));
    }

    #[test]
    fn test_unknown_access_value_is_rejected() {
        let result = SecuritySettings::from_toml_str(
            r#"
            [[rules]]
            patterns = ["/x"]
            access = "sometimes"
            "#,
        );

        assert!(matches!(result, Err(ConfigError::Settings { .. })));
    }
}
