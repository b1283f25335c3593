//! The access policy: everything the request pipeline consults, built once at
//! startup and shared read-only across workers.
//!
//! # Spring Security Equivalent
//! A `@Configuration` class exposing a `SecurityFilterChain`, a
//! `UserDetailsService` and a `PasswordEncoder` bean, wired by hand instead of
//! by a container.

use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::authenticator::MemoryAuthenticator;
use crate::http::security::authorizer::{
    Access, RequestMatcherAuthorizer, RuleSet, RuleSetBuilder,
};
use crate::http::security::crypto::{NoOpPasswordEncoder, PasswordEncoder};
use crate::http::security::entry_point::{AuthenticationEntryPoint, ChallengePolicy};
use crate::http::security::form_login::{FormLoginConfig, FormLoginService};
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::identities::InMemoryIdentities;
use crate::http::security::middleware::SecurityTransform;
use crate::http::security::session::SessionConfig;
use crate::http::security::user::User;

/// Immutable, fully validated security policy.
#[derive(Clone)]
pub struct SecurityPolicy {
    rules: Arc<RuleSet>,
    identities: Arc<InMemoryIdentities>,
    password_encoder: Arc<dyn PasswordEncoder>,
    entry_point: AuthenticationEntryPoint,
}

impl SecurityPolicy {
    pub fn builder() -> HttpSecurity {
        HttpSecurity::new()
    }

    /// Requirement for a request path.
    pub fn evaluate(&self, path: &str) -> Access {
        self.rules.evaluate(path)
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.identities.find(username)
    }

    /// Compares a presented credential with a stored one.
    pub fn verify(&self, presented: &str, stored: &str) -> bool {
        self.password_encoder.matches(presented, stored)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn identities(&self) -> &InMemoryIdentities {
        &self.identities
    }

    pub fn password_encoder(&self) -> &dyn PasswordEncoder {
        self.password_encoder.as_ref()
    }

    pub fn entry_point(&self) -> &AuthenticationEntryPoint {
        &self.entry_point
    }

    pub fn authenticator(&self) -> MemoryAuthenticator {
        let authenticator =
            MemoryAuthenticator::new(self.identities.clone(), self.password_encoder.clone());
        if self.entry_point.form_login().is_some() {
            authenticator.with_session(self.entry_point.session_config().clone())
        } else {
            authenticator
        }
    }

    pub fn authorizer(&self) -> RequestMatcherAuthorizer {
        RequestMatcherAuthorizer::new(self.rules.clone(), self.entry_point.clone())
    }

    /// Middleware for `App::wrap`.
    pub fn transform(&self) -> SecurityTransform<MemoryAuthenticator, RequestMatcherAuthorizer> {
        SecurityTransform::new(self.authenticator(), self.authorizer())
    }

    /// Login/logout routes, when form login is enabled.
    pub fn form_login_service(&self) -> Option<FormLoginService> {
        self.entry_point.form_login().map(|config| {
            FormLoginService::new(
                self.authenticator(),
                config.clone(),
                self.entry_point.session_config().clone(),
            )
        })
    }
}

/// Startup-time policy builder.
///
/// # Example
/// ```
/// use bank_security_core::http::security::authorizer::Access;
/// use bank_security_core::http::security::{
///     FormLoginConfig, HttpBasicConfig, NoOpPasswordEncoder, RuleSet, SecurityPolicy, User,
/// };
///
/// let policy = SecurityPolicy::builder()
///     .authorize_http_requests(
///         RuleSet::builder().request_matchers(&["/myAccount"], Access::Authenticated),
///     )
///     .form_login(FormLoginConfig::new())
///     .http_basic(HttpBasicConfig::new())
///     .user_details(vec![User::with_username("admin").password("12345").roles(&["admin"])])
///     .password_encoder(NoOpPasswordEncoder)
///     .build()
///     .unwrap();
///
/// assert_eq!(policy.evaluate("/myAccount"), Access::Authenticated);
/// ```
pub struct HttpSecurity {
    rules: RuleSetBuilder,
    form_login: Option<FormLoginConfig>,
    http_basic: Option<HttpBasicConfig>,
    challenge_policy: ChallengePolicy,
    session: SessionConfig,
    users: Vec<User>,
    password_encoder: Arc<dyn PasswordEncoder>,
}

impl HttpSecurity {
    pub fn new() -> Self {
        HttpSecurity {
            rules: RuleSetBuilder::new(),
            form_login: None,
            http_basic: None,
            challenge_policy: ChallengePolicy::default(),
            session: SessionConfig::new(),
            users: Vec::new(),
            password_encoder: Arc::new(NoOpPasswordEncoder),
        }
    }

    pub fn authorize_http_requests(mut self, rules: RuleSetBuilder) -> Self {
        self.rules = rules;
        self
    }

    pub fn form_login(mut self, config: FormLoginConfig) -> Self {
        self.form_login = Some(config);
        self
    }

    pub fn http_basic(mut self, config: HttpBasicConfig) -> Self {
        self.http_basic = Some(config);
        self
    }

    pub fn challenge_policy(mut self, policy: ChallengePolicy) -> Self {
        self.challenge_policy = policy;
        self
    }

    pub fn session(mut self, config: SessionConfig) -> Self {
        self.session = config;
        self
    }

    pub fn user_details(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn password_encoder<E: PasswordEncoder + 'static>(self, encoder: E) -> Self {
        self.password_encoder_arc(Arc::new(encoder))
    }

    pub fn password_encoder_arc(mut self, encoder: Arc<dyn PasswordEncoder>) -> Self {
        self.password_encoder = encoder;
        self
    }

    /// Validates everything and freezes the policy.
    ///
    /// Nothing is returned unless every part is valid.
    pub fn build(self) -> Result<SecurityPolicy, ConfigError> {
        let identities = InMemoryIdentities::new(self.users)?;
        for user in identities.iter() {
            if !self.password_encoder.is_well_formed(user.get_password()) {
                return Err(ConfigError::MalformedCredential {
                    username: user.get_username().to_string(),
                });
            }
        }
        if self.password_encoder.name() == "noop" {
            log::warn!(
                "NoOpPasswordEncoder selected: credentials are compared in plaintext, \
                 do not use in production"
            );
        }

        let rules = self.rules.build()?;
        let entry_point = AuthenticationEntryPoint::new(
            self.form_login,
            self.http_basic,
            self.challenge_policy,
            self.session,
        )?;

        log::info!(
            "security policy built: {} path rules (default {:?}), {} identities, encoder {}",
            rules.rules().len(),
            rules.default_access(),
            identities.iter().count(),
            self.password_encoder.name()
        );

        Ok(SecurityPolicy {
            rules: Arc::new(rules),
            identities: Arc::new(identities),
            password_encoder: self.password_encoder,
            entry_point,
        })
    }
}

impl Default for HttpSecurity {
    fn default() -> Self {
        Self::new()
    }
}
