//! Application settings.
//!
//! Sources, later ones winning: built-in defaults, the optional TOML file
//! given on the command line, `BANK__*` environment variables
//! (e.g. `BANK__SERVER__BIND=0.0.0.0:8080`).
//!
//! Without a `[security]` section the in-code policy from
//! [`crate::security_config`] is used.

use bank_security_core::http::error::ConfigError;
use bank_security_core::http::security::{SecurityPolicy, SecuritySettings};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::security_config::project_security_config;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub server: ServerSettings,
    #[serde(default)]
    pub security: Option<SecuritySettings>,
}

impl AppSettings {
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().set_default("server.bind", "127.0.0.1:8080")?;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("BANK").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn security_policy(&self) -> Result<SecurityPolicy, ConfigError> {
        match &self.security {
            Some(security) => SecurityPolicy::from_settings(security),
            None => project_security_config(),
        }
    }
}
