//! `fine-compare.toml` handling.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection_string = "players.db"
//!
//! [logging]
//! level = "info"
//! file = "fine-compare.log"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fine_core::db::DbConfig;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FINE_COMPARE_CONFIG";

/// Looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "fine-compare.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DbConfig::default();
        Self {
            backend: db.backend,
            connection_string: db.connection_string,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Append log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl AppConfig {
    pub fn from_toml(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Finds and loads the configuration.
    ///
    /// An explicit path or the [`CONFIG_ENV`] variable must point at an
    /// existing file. The [`DEFAULT_CONFIG_FILE`] in `dir` is used only if
    /// present; otherwise built-in defaults apply.
    pub fn discover(
        explicit: Option<&Path>,
        env_value: Option<String>,
        dir: &Path,
    ) -> Result<(Self, ConfigSource), ConfigError> {
        let required = explicit
            .map(Path::to_path_buf)
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from));

        let path = match required {
            Some(path) => path,
            None => {
                let fallback = dir.join(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok((Self::default(), ConfigSource::Defaults));
                }
                fallback
            }
        };

        let config = Self::load(&path)?;
        config.validate()?;
        Ok((config, ConfigSource::File(path)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.backend.trim().is_empty() {
            return Err(ConfigError::Invalid("database.backend must not be empty".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".into()));
        }
        Ok(())
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.database.backend.clone(),
            connection_string: self.database.connection_string.clone(),
        }
    }
}
