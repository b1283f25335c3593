//! Credential verifiers.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.crypto.password.PasswordEncoder`
//!
//! # Feature Flags
//! - `argon2`: Enables `Argon2PasswordEncoder` (default)

#[cfg(feature = "argon2")]
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
#[cfg(feature = "argon2")]
use argon2::Argon2;
#[cfg(feature = "argon2")]
use rand::rngs::OsRng;
use serde::Deserialize;

use crate::http::error::{ConfigError, CryptoError};

/// Encodes credentials at enrollment and compares them at login.
///
/// The same encoder must be used on both sides.
pub trait PasswordEncoder: Send + Sync {
    /// Encode the raw password.
    fn encode(&self, raw_password: &str) -> Result<String, CryptoError>;

    /// Verify a presented password against a stored one.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;

    /// Whether a stored credential has a shape this encoder can verify.
    ///
    /// Checked once at startup so a mismatched store fails fast instead of
    /// rejecting every login.
    fn is_well_formed(&self, _encoded_password: &str) -> bool {
        true
    }

    fn name(&self) -> &'static str;
}

/// Plain equality comparison, no hashing and no salt.
///
/// # Spring Security Equivalent
/// `NoOpPasswordEncoder`
///
/// # Warning
/// **NOT suitable for production.** Stored credentials are plaintext.
///
/// # Example
/// ```
/// use bank_security_core::http::security::crypto::{NoOpPasswordEncoder, PasswordEncoder};
///
/// let encoder = NoOpPasswordEncoder;
/// assert!(encoder.matches("12345", "12345"));
/// assert!(!encoder.matches("12346", "12345"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, CryptoError> {
        Ok(raw_password.to_string())
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        raw_password == encoded_password
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Argon2 encoder producing salted PHC strings.
///
/// # Spring Security Equivalent
/// `Argon2PasswordEncoder`
///
/// # Example
/// ```
/// use bank_security_core::http::security::crypto::{Argon2PasswordEncoder, PasswordEncoder};
///
/// let encoder = Argon2PasswordEncoder::new();
/// let hash = encoder.encode("12345").unwrap();
///
/// assert!(encoder.matches("12345", &hash));
/// assert!(!encoder.matches("54321", &hash));
/// ```
#[cfg(feature = "argon2")]
#[derive(Clone, Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

#[cfg(feature = "argon2")]
impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Argon2PasswordEncoder {
            argon2: Argon2::default(),
        }
    }
}

#[cfg(feature = "argon2")]
impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, CryptoError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw_password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CryptoError::new(e.to_string()))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        match PasswordHash::new(encoded_password) {
            Ok(parsed_hash) => self
                .argon2
                .verify_password(raw_password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn is_well_formed(&self, encoded_password: &str) -> bool {
        PasswordHash::new(encoded_password).is_ok()
    }

    fn name(&self) -> &'static str {
        "argon2"
    }
}

/// Encoder selection as it appears in settings.
///
/// `noop` is the default to match the declared behaviour; any real deployment
/// has to opt into `argon2` explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordEncoderKind {
    #[default]
    NoOp,
    Argon2,
}

impl PasswordEncoderKind {
    /// Instantiates the selected encoder.
    pub fn build(self) -> Result<Box<dyn PasswordEncoder>, ConfigError> {
        match self {
            PasswordEncoderKind::NoOp => Ok(Box::new(NoOpPasswordEncoder)),
            #[cfg(feature = "argon2")]
            PasswordEncoderKind::Argon2 => Ok(Box::new(Argon2PasswordEncoder::new())),
            #[cfg(not(feature = "argon2"))]
            PasswordEncoderKind::Argon2 => Err(ConfigError::UnsupportedEncoder {
                name: "argon2".to_string(),
            }),
        }
    }
}
