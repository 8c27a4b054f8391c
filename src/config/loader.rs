//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
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

/// Environment variable that overrides the configured shared secret.
pub const API_KEY_ENV: &str = "IMAGE_RELAY_API_KEY";

/// Apply environment overrides on top of a parsed configuration.
///
/// The shared secret can be injected at deploy time without writing it into
/// the config file.
pub fn apply_env_overrides(config: &mut RelayConfig) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            config.auth.api_key = Some(key);
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: RelayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
