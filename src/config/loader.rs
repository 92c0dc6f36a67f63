use std::collections::HashMap;
use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

/// Errors raised while loading or interpreting the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error while reading config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while reading config file: line {line} is not a `key=value` pair: {content:?}")]
    Malformed { line: usize, content: String },

    #[error("Missing required configuration key: '{0}'")]
    MissingKey(&'static str),

    #[error("Invalid value for '{key}': {value:?} is not a non-negative integer")]
    InvalidNumber {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Invalid value for '{key}': {value:?} (expected one of: {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Flat `key=value` configuration as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: HashMap<String, String>,
}

impl ConfigMap {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

/// Loads and parses the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<ConfigMap, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&contents)
}

/// Parses `key=value` lines.
///
/// Blank lines are skipped. Key and value are trimmed and the last occurrence
/// of a key wins. A line that does not contain exactly one `=` rejects the
/// whole file.
pub fn parse_config(contents: &str) -> Result<ConfigMap, ConfigError> {
    let mut config = ConfigMap::default();

    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ConfigError::Malformed {
                line: index + 1,
                content: line.to_string(),
            });
        };

        config.insert(key.trim(), value.trim());
    }

    Ok(config)
}
