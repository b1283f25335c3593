//! Error types.

mod auth_error;
mod config_error;

pub use auth_error::AuthError;
pub use config_error::{ConfigError, CryptoError};
