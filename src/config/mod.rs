//
//  abuseipdb-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads the client's JSON configuration and answers dotted-path lookups such
//! as `api.key` or `report.categories`.
//!
//! ## Configuration File Location
//!
//! Unless `--config` (or `ABUSEIPDB_CONFIG`) names a file, the platform config
//! directory is used:
//!
//! - **Linux**: `~/.config/abuseipdb/config.json`
//! - **macOS**: `~/Library/Application Support/abuseipdb/config.json`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\abuseipdb\config\config.json`
//!
//! A missing file is not an error: a warning is logged and the built-in
//! defaults apply. A file that exists but is not valid JSON is an error.
//!
//! ## Example Configuration File
//!
//! ```json
//! {
//!     "api": {
//!         "key": "0123456789abcdef",
//!         "timeout_secs": 30
//!     },
//!     "report": {
//!         "comment": "Automated report from fail2ban",
//!         "categories": ["brute-force", "ssh"]
//!     },
//!     "blacklist": {
//!         "limit": 10000,
//!         "confidence_minimum": 90
//!     }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use abuseipdb_client::config::Config;
//!
//! let config = Config::from_json(r#"{"api": {"key": "abc"}}"#)?;
//! assert!(config.has("api.key"));
//! assert_eq!(config.get::<String>("api.key")?, "abc");
//! assert_eq!(config.get_or("blacklist.limit", 42usize), 42);
//! # Ok::<(), abuseipdb_client::config::ConfigError>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::request::{BlacklistQuery, DEFAULT_BASE_URL};
use crate::api::transport::DEFAULT_TIMEOUT;
use crate::api::{CategorySet, ClientOptions, ReportCategory};

/// Shape of a configuration key: dot-separated segments of `[A-Za-z0-9_-]`.
static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*$").unwrap());

/// Configuration used when no file is present.
pub const DEFAULT_CONFIG: &str = r#"{
    "api": {
        "base_url": "https://api.abuseipdb.com/api/v2",
        "timeout_secs": 30
    },
    "report": {
        "categories": []
    },
    "blacklist": {
        "limit": 100000,
        "confidence_minimum": 100
    }
}"#;

/// Errors raised while loading or querying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The key does not match the dotted-path pattern.
    #[error("Invalid configuration key '{0}'")]
    InvalidKey(String),

    /// Attempt to retrieve a key that is not set.
    #[error("Attempt to retrieve non-existing config '{0}'")]
    MissingKey(String),

    /// The key exists but holds a value of the wrong shape.
    #[error("Invalid value for config '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Loaded configuration: a JSON tree plus the path it came from.
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
    root: Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            root: serde_json::from_str(DEFAULT_CONFIG).unwrap_or(Value::Null),
        }
    }
}

impl Config {
    /// Loads configuration from the platform default location.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoConfigDir`] if no home directory can be determined
    /// - [`ConfigError::Read`] / [`ConfigError::Parse`] if the file exists but is unusable
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !config_exists(path) {
            warn!(
                "Couldn't open config file {}; loading defaults. Some features may not work as expected",
                path.display()
            );
            return Ok(Self {
                path: Some(path.to_path_buf()),
                ..Self::default()
            });
        }

        debug!("Loading configuration from {}", path.display());
        let content = read_config_file(path)?;
        let root = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            root,
        })
    }

    /// Builds a configuration from an in-memory JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let root = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Ok(Self { path: None, root })
    }

    /// Returns the platform-specific path of `config.json`.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME).ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Path the configuration was loaded from (`None` for defaults and inline JSON).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lookup(&self, key: &str) -> Result<Option<&Value>, ConfigError> {
        if !KEY_PATTERN.is_match(key) {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }

        Ok(key
            .split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
            .filter(|value| !value.is_null()))
    }

    /// Returns `true` if `key` is set to a non-null value.
    ///
    /// Malformed keys are reported as absent.
    pub fn has(&self, key: &str) -> bool {
        matches!(self.lookup(key), Ok(Some(_)))
    }

    /// Returns the raw JSON value at `key`.
    pub fn get_value(&self, key: &str) -> Result<&Value, ConfigError> {
        self.lookup(key)?
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// Deserializes the value at `key`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidKey`] for malformed keys
    /// - [`ConfigError::MissingKey`] if the key is absent or `null`
    /// - [`ConfigError::InvalidValue`] if the value does not fit `T`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.get_value(key)?;
        serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Like [`get`](Self::get) but falls back to `default`. A value of the
    /// wrong type is logged and ignored.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(value) => value,
            Err(ConfigError::MissingKey(_)) => default,
            Err(e) => {
                warn!("{}; using default", e);
                default
            }
        }
    }

    /// The configured API key, if any. Empty strings count as unset.
    pub fn api_key(&self) -> Option<String> {
        self.get_or::<Option<String>>("api.key", None)
            .filter(|key| !key.trim().is_empty())
    }

    /// Client construction options (`api.base_url`, `api.timeout_secs`).
    pub fn client_options(&self) -> ClientOptions {
        let timeout = self
            .get_or::<Option<u64>>("api.timeout_secs", None)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        ClientOptions {
            base_url: self.get_or("api.base_url", DEFAULT_BASE_URL.to_string()),
            timeout,
        }
    }

    /// Default report comment (`report.comment`).
    pub fn default_comment(&self) -> Option<String> {
        self.get_or::<Option<String>>("report.comment", None)
            .filter(|comment| !comment.is_empty())
    }

    /// Default report categories (`report.categories`).
    ///
    /// Entries may be category names (`"brute-force"`) or wire codes (`18`).
    pub fn default_categories(&self) -> Result<CategorySet, ConfigError> {
        const KEY: &str = "report.categories";

        let entries = match self.lookup(KEY)? {
            None => return Ok(CategorySet::EMPTY),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ConfigError::InvalidValue {
                    key: KEY.to_string(),
                    message: "expected a list of categories".to_string(),
                })
            }
        };

        entries
            .iter()
            .map(|entry| {
                let parsed = match entry {
                    Value::String(name) => name.parse::<ReportCategory>().ok(),
                    Value::Number(code) => code
                        .as_u64()
                        .and_then(|code| u8::try_from(code).ok())
                        .and_then(ReportCategory::from_wire_code),
                    _ => None,
                };
                parsed.ok_or_else(|| ConfigError::InvalidValue {
                    key: KEY.to_string(),
                    message: format!("unknown category {entry}"),
                })
            })
            .collect()
    }

    /// Default blacklist options (`blacklist.limit`, `blacklist.confidence_minimum`).
    pub fn blacklist_query(&self) -> BlacklistQuery {
        let defaults = BlacklistQuery::default();
        BlacklistQuery {
            limit: self.get_or("blacklist.limit", defaults.limit),
            minimum_confidence: self
                .get_or("blacklist.confidence_minimum", defaults.minimum_confidence),
            ..defaults
        }
    }
}
