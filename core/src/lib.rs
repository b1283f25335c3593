//! # Bank Security Core
//!
//! Startup-time access policy for an actix-web application: ordered path
//! rules, a static in-memory identity set, a credential verifier and the
//! form-login / HTTP Basic handshakes that challenge anonymous requests.
//!
//! ## Modules
//!
//! - [`http::security`] - Policy building blocks and the request middleware
//! - [`http::error`] - Error types

pub mod http;
