//! Path-rule based authorization.
//!
//! # Spring Security Equivalent
//! `authorizeHttpRequests(requests -> requests.requestMatchers(..).authenticated()
//! .requestMatchers(..).permitAll())`, i.e.
//! `RequestMatcherDelegatingAuthorizationManager`.
//!
//! Rules are evaluated in registration order and the first match wins. A path
//! that matches nothing gets the rule set's explicit default, which is
//! [`Access::Authenticated`] unless overridden with
//! [`RuleSetBuilder::any_request`].

use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use regex::Regex;
use serde::Deserialize;

use crate::http::error::ConfigError;
use crate::http::security::ant_matcher::AntMatcher;
use crate::http::security::config::{Authentication, Authorizer, Decision};
use crate::http::security::entry_point::AuthenticationEntryPoint;

/// Access requirement attached to a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Any authenticated identity.
    Authenticated,
    /// No credentials needed.
    #[serde(alias = "permit_all")]
    Public,
}

/// Pattern syntax of a rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Ant,
    Regex,
}

#[derive(Debug, Clone)]
pub enum RequestMatcher {
    Ant(AntMatcher),
    /// Anchored at both ends.
    Regex(Regex),
}

impl RequestMatcher {
    pub fn ant(pattern: &str) -> Self {
        RequestMatcher::Ant(AntMatcher::new(pattern))
    }

    pub fn regex(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(&format!("^(?:{})$", pattern))
            .map(RequestMatcher::Regex)
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RequestMatcher::Ant(m) => m.matches(path),
            RequestMatcher::Regex(re) => re.is_match(path),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            RequestMatcher::Ant(m) => m.pattern(),
            RequestMatcher::Regex(re) => re.as_str(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathRule {
    matcher: RequestMatcher,
    access: Access,
}

impl PathRule {
    pub fn matcher(&self) -> &RequestMatcher {
        &self.matcher
    }

    pub fn access(&self) -> Access {
        self.access
    }
}

/// Ordered, immutable list of path rules plus the default for unmatched paths.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<PathRule>,
    default_access: Access,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// First rule whose pattern matches `path`, in registration order.
    pub fn find(&self, path: &str) -> Option<&PathRule> {
        self.rules.iter().find(|rule| rule.matcher.matches(path))
    }

    pub fn evaluate(&self, path: &str) -> Access {
        self.find(path)
            .map(PathRule::access)
            .unwrap_or(self.default_access)
    }

    pub fn default_access(&self) -> Access {
        self.default_access
    }

    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }
}

enum Declaration {
    Ant(String),
    Regex(String),
}

/// Collects rule declarations; patterns are compiled in [`RuleSetBuilder::build`].
///
/// # Example
/// ```
/// use bank_security_core::http::security::authorizer::{Access, RuleSet};
///
/// let rules = RuleSet::builder()
///     .request_matchers(&["/myAccount", "/myCards"], Access::Authenticated)
///     .request_matchers(&["/notices"], Access::Public)
///     .build()
///     .unwrap();
///
/// assert_eq!(rules.evaluate("/notices"), Access::Public);
/// assert_eq!(rules.evaluate("/unknown"), Access::Authenticated);
/// ```
pub struct RuleSetBuilder {
    declarations: Vec<(Declaration, Access)>,
    default_access: Access,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        RuleSetBuilder {
            declarations: Vec::new(),
            default_access: Access::Authenticated,
        }
    }

    /// Ant-style patterns sharing one requirement.
    pub fn request_matchers(mut self, patterns: &[&str], access: Access) -> Self {
        for pattern in patterns {
            self.declarations
                .push((Declaration::Ant(pattern.to_string()), access));
        }
        self
    }

    /// Regex patterns sharing one requirement.
    pub fn regex_matchers(mut self, patterns: &[&str], access: Access) -> Self {
        for pattern in patterns {
            self.declarations
                .push((Declaration::Regex(pattern.to_string()), access));
        }
        self
    }

    /// Requirement for paths no rule matches.
    pub fn any_request(mut self, access: Access) -> Self {
        self.default_access = access;
        self
    }

    pub fn build(self) -> Result<RuleSet, ConfigError> {
        let mut rules = Vec::with_capacity(self.declarations.len());
        for (declaration, access) in self.declarations {
            let matcher = match declaration {
                Declaration::Ant(pattern) => {
                    let matcher = AntMatcher::new(&pattern);
                    if !matcher.is_absolute() {
                        log::warn!(
                            "path pattern '{}' has no leading '/' and will never match a request path",
                            pattern
                        );
                    }
                    RequestMatcher::Ant(matcher)
                }
                Declaration::Regex(pattern) => RequestMatcher::regex(&pattern)?,
            };
            rules.push(PathRule { matcher, access });
        }

        Ok(RuleSet {
            rules,
            default_access: self.default_access,
        })
    }
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware-facing authorizer: evaluates the rule set and challenges
/// anonymous requests to protected paths.
#[derive(Clone)]
pub struct RequestMatcherAuthorizer {
    rules: Arc<RuleSet>,
    entry_point: AuthenticationEntryPoint,
}

impl RequestMatcherAuthorizer {
    pub fn new(rules: Arc<RuleSet>, entry_point: AuthenticationEntryPoint) -> Self {
        RequestMatcherAuthorizer { rules, entry_point }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Authorizer for RequestMatcherAuthorizer {
    fn decide(&self, req: &ServiceRequest, authentication: &Authentication) -> Decision {
        let path = req.path();
        if matches!(authentication, Authentication::Failed) {
            return Decision::Reject(self.entry_point.basic_challenge(req));
        }
        if self.entry_point.is_login_path(path) {
            return Decision::Permit;
        }

        match (self.rules.evaluate(path), authentication.user()) {
            (Access::Public, _) => Decision::Permit,
            (Access::Authenticated, Some(u)) => {
                log::debug!("{} granted to {}", path, u.get_username());
                Decision::Permit
            }
            (Access::Authenticated, None) => {
                Decision::Reject(self.entry_point.challenge(req))
            }
        }
    }
}
