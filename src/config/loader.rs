//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ManagerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Cluster URL.
pub const ENV_HOST: &str = "ES_HOST_PROD";
/// Basic auth user.
pub const ENV_USER: &str = "ES_USER_PROD";
/// Basic auth password.
pub const ENV_PASSWORD: &str = "ES_PASSWORD_PROD";
/// Request timeout in seconds.
pub const ENV_TIMEOUT: &str = "ES_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value for {}: '{}'", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML file into a configuration without validating it.
pub fn read_config_file(path: &Path) -> Result<ManagerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Unset and empty variables leave the current value alone.
pub fn apply_env_overrides<F>(config: &mut ManagerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(host) = get(ENV_HOST) {
        config.connection.host = host;
    }
    if let Some(user) = get(ENV_USER) {
        config.connection.username = user;
    }
    if let Some(password) = get(ENV_PASSWORD) {
        config.connection.password = password;
    }
    if let Some(raw) = get(ENV_TIMEOUT) {
        config.connection.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_TIMEOUT,
            value: raw.clone(),
        })?;
    }

    Ok(())
}

/// Build the effective configuration from the process environment.
pub fn load_config(
    path: Option<&Path>,
    host_override: Option<&str>,
) -> Result<ManagerConfig, ConfigError> {
    load_config_with(path, host_override, |name| std::env::var(name).ok())
}

/// Build the effective configuration: defaults, then the optional file, then
/// the environment read through `lookup`, then `host_override`. The merged
/// result is validated.
pub fn load_config_with<F>(
    path: Option<&Path>,
    host_override: Option<&str>,
    lookup: F,
) -> Result<ManagerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ManagerConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;

    if let Some(host) = host_override {
        config.connection.host = host.to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
