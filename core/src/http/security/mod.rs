//! Security module: the access policy and the middleware that enforces it.
//!
//! # Spring Equivalent
//! `org.springframework.security` package
//!
//! # Module Structure
//!
//! - `ant_matcher` - Ant-style URL pattern matching
//! - `authorizer` - Path rules, rule set, request authorizer
//! - `identities` - Static in-memory identity set
//! - `crypto` - Credential verifiers (NoOp, Argon2)
//! - `http_basic` - HTTP Basic handshake
//! - `form_login` - Form login handshake (login page, login, logout)
//! - `session` - Session storage used by form login
//! - `entry_point` - Challenge selection for anonymous requests
//! - `authenticator` - Resolves the caller from Basic credentials or session
//! - `middleware` - Security middleware (SecurityTransform)
//! - `policy` - Policy builder and the built policy
//! - `settings` - Externalised policy settings
//!
//! # Feature Flags
//! - `argon2`: Enables `Argon2PasswordEncoder`

pub use ant_matcher::AntMatcher;
pub use authenticator::MemoryAuthenticator;
pub use authorizer::{Access, PathRule, RequestMatcherAuthorizer, RuleSet, RuleSetBuilder};
pub use config::{Authentication, Authenticator, Authorizer, Decision};
#[cfg(feature = "argon2")]
pub use crypto::Argon2PasswordEncoder;
pub use crypto::{NoOpPasswordEncoder, PasswordEncoder, PasswordEncoderKind};
pub use entry_point::{AuthenticationEntryPoint, ChallengePolicy, HandshakeMode};
pub use extractor::{AuthenticatedUser, OptionalUser};
pub use form_login::{FormLoginConfig, FormLoginService, LoginForm};
pub use http_basic::{BasicCredentials, HttpBasicConfig};
pub use identities::InMemoryIdentities;
pub use policy::{HttpSecurity, SecurityPolicy};
pub use session::{SessionConfig, SessionFixationStrategy};
pub use settings::SecuritySettings;
pub use user::User;

mod config;
mod extractor;
mod user;

pub mod ant_matcher;
pub mod authenticator;
pub mod authorizer;
pub mod crypto;
pub mod entry_point;
pub mod form_login;
pub mod http_basic;
pub mod identities;
pub mod middleware;
pub mod policy;
pub mod session;
pub mod settings;
