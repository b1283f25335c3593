//! The project's security configuration.
//!
//! # Spring Security Equivalent
//! ```java
//! @Configuration
//! public class ProjectSecurityConfig {
//!     @Bean SecurityFilterChain defaultSecurityFilterChain(HttpSecurity http) { ... }
//!     @Bean InMemoryUserDetailsManager userDetailsManager() { ... }
//!     @Bean PasswordEncoder passwordEncoder() { return NoOpPasswordEncoder.getInstance(); }
//! }
//! ```
//!
//! The patterns are kept exactly as declared. Only `/myAccount` has a leading
//! slash; `myLoans`, `myBalance`, `myCards`, `notices` and `contact` never
//! match a request path, so those paths fall through to the fail-closed
//! default and `/notices` and `/contact` are NOT public.

use bank_security_core::http::error::ConfigError;
use bank_security_core::http::security::{
    Access, FormLoginConfig, HttpBasicConfig, NoOpPasswordEncoder, RuleSet, RuleSetBuilder,
    SecurityPolicy, User,
};

/// Authenticated and public paths, in registration order.
pub fn default_security_filter_chain() -> RuleSetBuilder {
    RuleSet::builder()
        .request_matchers(
            &["/myAccount", "myLoans", "myBalance", "myCards"],
            Access::Authenticated,
        )
        .request_matchers(&["notices", "contact"], Access::Public)
        .any_request(Access::Authenticated)
}

/// Not for production: plaintext credentials.
pub fn user_details() -> Vec<User> {
    vec![
        User::with_username("admin").password("12345").roles(&["admin"]),
        User::with_username("user").password("12345").roles(&["read"]),
    ]
}

/// Plain equality comparison. Not for production.
pub fn password_encoder() -> NoOpPasswordEncoder {
    NoOpPasswordEncoder
}

/// Form login and HTTP Basic both enabled.
pub fn project_security_config() -> Result<SecurityPolicy, ConfigError> {
    SecurityPolicy::builder()
        .authorize_http_requests(default_security_filter_chain())
        .form_login(FormLoginConfig::new())
        .http_basic(HttpBasicConfig::new())
        .user_details(user_details())
        .password_encoder(password_encoder())
        .build()
}
