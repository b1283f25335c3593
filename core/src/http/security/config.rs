//! Seams between the security middleware and the policy.
//!
//! # Spring Equivalent
//! `AuthenticationProvider` and `AuthorizationManager` interfaces

use actix_web::dev::ServiceRequest;
use actix_web::HttpResponse;

use crate::http::security::user::User;

/// Result of resolving the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Authentication {
    /// Valid credentials or session. The `User` carries no credential.
    Authenticated(User),
    /// Credentials were presented and rejected.
    Failed,
    /// Nothing presented.
    Anonymous,
}

impl Authentication {
    pub fn user(&self) -> Option<&User> {
        match self {
            Authentication::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Resolves the caller's identity from an incoming request.
pub trait Authenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Authentication;
}

/// Outcome of an authorization check.
pub enum Decision {
    /// Forward to the handler.
    Permit,
    /// Short-circuit with this response (a challenge or a denial).
    Reject(HttpResponse),
}

/// Decides whether a request may reach its handler.
pub trait Authorizer {
    fn decide(&self, req: &ServiceRequest, authentication: &Authentication) -> Decision;
}
