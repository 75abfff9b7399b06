// SPDX-License-Identifier: GPL-3.0-only

//! Key-value persistence for settings that outlive a session.
//!
//! The keyboard stores the last selected language under
//! [`STORAGE_KEY`](crate::app_settings::STORAGE_KEY) and reads it back once at
//! start-up.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for persistent stores.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// The file being accessed
        path: PathBuf,
    },

    /// The backing file does not hold a JSON string map
    Json {
        /// The underlying JSON error
        source: serde_json::Error,
        /// The file being parsed
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { source, path } => {
                write!(f, "I/O error on store '{}': {}", path.display(), source)
            }
            StoreError::Json { source, path } => {
                write!(f, "Invalid store file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Json { source, .. } => Some(source),
        }
    }
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                source,
                path: path.clone(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { source, path }),
        };

        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values).map_err(|source| StoreError::Json {
            source,
            path: self.path.clone(),
        })?;

        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            source,
            path: self.path.clone(),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
