use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the default configuration path, `~/.lntop/config.toml`.
    ///
    /// Falls back to the current directory if the home directory is unknown.
    pub fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".lntop").join("config.toml")
    }

    /// Loads configuration from `path`, or from the default path when `None`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::ParseError {
                path: PathBuf::from("<inline>"),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })
    }

    fn parse(content: &str) -> Result<Self, ParseFailure> {
        let config: Config = toml::from_str(content).map_err(ParseFailure::Toml)?;
        config.validate().map_err(ParseFailure::Invalid)?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The network type is one we can talk to
    /// - The node address is set
    /// - The event queue has room for at least one event
    /// - The poll interval and refresh timeout are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.kind != "lnd" {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Network type '{}' is not supported (expected 'lnd')",
                    self.network.kind
                ),
            });
        }

        if self.network.address.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Network address must not be empty".to_string(),
            });
        }

        if self.ui.event_buffer == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.event_buffer must be greater than zero".to_string(),
            });
        }

        if self.ui.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.poll_interval_secs must be greater than zero".to_string(),
            });
        }

        if self.ui.refresh_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "ui.refresh_timeout_secs must be greater than zero when set".to_string(),
            });
        }

        Ok(())
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}
