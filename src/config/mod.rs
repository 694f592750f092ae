//! Runtime configuration: defaults, an optional JSON file, then environment overrides.

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    ledger::KindPolicy,
    storage::{JsonStorage, WriteMode, DEFAULT_LEDGER_FILE},
};

const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const CONFIG_FILE: &str = "config.json";

pub const HOME_ENV: &str = "BUDGET_TRACKER_HOME";
pub const FILE_ENV: &str = "BUDGET_TRACKER_FILE";
pub const WRITE_MODE_ENV: &str = "BUDGET_TRACKER_WRITE_MODE";
pub const KIND_POLICY_ENV: &str = "BUDGET_TRACKER_KIND_POLICY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger_file: PathBuf,
    pub write_mode: WriteMode,
    pub kind_policy: KindPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            write_mode: WriteMode::default(),
            kind_policy: KindPolicy::default(),
        }
    }
}

impl Config {
    /// Applies `BUDGET_TRACKER_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup(FILE_ENV).filter(|value| !value.trim().is_empty()) {
            self.ledger_file = PathBuf::from(file);
        }
        if let Some(raw) = lookup(WRITE_MODE_ENV) {
            self.write_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "overwrite" => WriteMode::Overwrite,
                "atomic" => WriteMode::Atomic,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: WRITE_MODE_ENV,
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup(KIND_POLICY_ENV) {
            self.kind_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "lenient" => KindPolicy::Lenient,
                "strict" => KindPolicy::Strict,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: KIND_POLICY_ENV,
                        value: raw,
                    })
                }
            };
        }
        Ok(())
    }

    pub fn storage(&self) -> JsonStorage {
        JsonStorage::new(self.ledger_file.clone(), self.write_mode)
    }
}

/// Locates and reads the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$BUDGET_TRACKER_HOME/config.json`, falling back to `~/.budget_tracker/config.json`.
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file if present. A missing file yields the defaults.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// File values with process environment overrides applied.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = self.load()?;
        config.apply_overrides(|key| env::var(key).ok())?;
        tracing::debug!(?config, source = %self.path.display(), "resolved configuration");
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the application data directory, defaulting to `~/.budget_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
