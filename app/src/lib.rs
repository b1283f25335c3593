//! Bank web application secured by `bank-security-core`.

pub mod handlers;
pub mod security_config;
pub mod settings;
