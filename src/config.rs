// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for loading the user configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// The config file path
        path: PathBuf,
    },

    /// The config file is not valid JSON for [`Config`]
    Json {
        /// The underlying JSON error
        source: serde_json::Error,
        /// The config file path
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { source, path } => {
                write!(f, "Failed to read config '{}': {}", path.display(), source)
            }
            ConfigError::Json { source, path } => {
                write!(f, "Invalid config '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
        }
    }
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language used when the store holds no last selection.
    pub default_language: String,
    /// JSON file for the key-value store; in-memory when unset.
    pub store_path: Option<PathBuf>,
    /// Keyboard resource file; the bundled resource when unset.
    pub layout_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: app_settings::DEFAULT_LANGUAGE.to_string(),
            store_path: None,
            layout_path: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a JSON file. Missing fields default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            source,
            path: path.to_path_buf(),
        })
    }
}
