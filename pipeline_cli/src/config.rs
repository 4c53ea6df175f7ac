//! CLI configuration loaded from `pipeline_sizing.toml`.
//!
//! ```toml
//! engineer = "J. Engineer"
//! axial_check = "magnitude"
//! report_dir = "reports"
//! log_level = "debug"
//! ```
//!
//! Every key is optional. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use pipeline_core::calculations::AxialCheck;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "pipeline_sizing.toml";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name printed in reports
    pub engineer: String,
    /// Axial check used when `--axial-check` is not given
    pub axial_check: AxialCheck,
    /// Directory for reports saved under their default name
    pub report_dir: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engineer: "Unknown".to_string(),
            axial_check: AxialCheck::default(),
            report_dir: None,
            log_level: LogLevel::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the config at `path`, or the default file when `path` is `None`.
    ///
    /// A missing default file yields [`Config::default`]; an explicitly
    /// requested file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Config::from_toml(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}
