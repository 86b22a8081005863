//! Configuration loading: TOML file merged with `KENTIK_*` env vars.
//!
//! Credentials are resolved once at process start into an explicit
//! [`Settings`] value; nothing below the CLI boundary reads the
//! environment.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use kentik_api::{Credentials, Region, TransportConfig, transport};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Raw configuration as read from file + environment.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Kentik account email (`KENTIK_EMAIL`).
    pub email: Option<String>,

    /// Kentik API token (`KENTIK_TOKEN`).
    pub token: Option<String>,

    /// Portal region (`KENTIK_REGION`), US or EU.
    #[serde(default = "default_region")]
    pub region: String,

    /// Request timeout in seconds (`KENTIK_TIMEOUT`).
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email: None,
            token: None,
            region: default_region(),
            timeout: default_timeout(),
        }
    }
}

fn default_region() -> String {
    "US".into()
}
fn default_timeout() -> u64 {
    transport::DEFAULT_TIMEOUT_SECS
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "kentik", "kentik").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("kentik");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("KENTIK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Fully resolved API settings, built once and passed by reference.
pub struct Settings {
    pub region: Region,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

/// Combine loaded config with CLI flag overrides.
pub fn resolve(config: &Config, global: &GlobalOpts) -> Result<Settings, CliError> {
    let email = config.email.clone().ok_or(CliError::NoCredentials {
        what: "account email",
        variable: "KENTIK_EMAIL",
    })?;
    let token = config.token.clone().ok_or(CliError::NoCredentials {
        what: "API token",
        variable: "KENTIK_TOKEN",
    })?;

    let region_str = global.region.as_deref().unwrap_or(&config.region);
    let region: Region = region_str
        .parse()
        .map_err(|_| CliError::InvalidRegion {
            region: region_str.into(),
        })?;

    let timeout = global.timeout.unwrap_or(config.timeout);

    Ok(Settings {
        region,
        credentials: Credentials::new(email, SecretString::from(token)),
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout),
        },
    })
}
