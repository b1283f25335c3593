use derive_more::{Display, Error};

/// Fatal startup errors raised while building the security policy.
///
/// Any of these aborts startup; no partially built policy is ever returned.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("duplicate username '{username}' in identity set")]
    DuplicateUsername { username: String },
    #[display("identity set is empty")]
    EmptyIdentitySet,
    #[display("identity with an empty username")]
    EmptyUsername,
    #[display("user '{username}' has no roles")]
    EmptyRoles { username: String },
    #[display("stored credential for '{username}' is not valid for the selected password encoder")]
    MalformedCredential { username: String },
    #[display("invalid path pattern '{pattern}': {source}")]
    InvalidPattern { pattern: String, source: regex::Error },
    #[display("no authentication handshake mode enabled")]
    NoHandshakeMode,
    #[display("password encoder '{name}' is not available in this build")]
    UnsupportedEncoder { name: String },
    #[display("settings error: {source}")]
    Settings { source: config::ConfigError },
}

impl From<config::ConfigError> for ConfigError {
    fn from(source: config::ConfigError) -> Self {
        ConfigError::Settings { source }
    }
}

/// Failure to encode a raw password.
#[derive(Debug, Display, Error)]
#[display("password hashing failed: {reason}")]
pub struct CryptoError {
    reason: String,
}

impl CryptoError {
    pub fn new(reason: impl Into<String>) -> Self {
        CryptoError {
            reason: reason.into(),
        }
    }
}
