//! Configuration module for the calculator.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CALCULATOR_`. Top-level keys
//! map directly; double underscores separate nested levels:
//! - `CALCULATOR_MAX_HISTORY_SIZE=50` sets `max_history_size`
//! - `CALCULATOR_AUTO_SAVE=false` sets `auto_save`
//! - `CALCULATOR_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::MAX_PRECISION;

/// Directory searched for `settings.toml`.
pub const CONFIG_DIR: &str = ".reckon";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CALCULATOR_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Directory for the history file and journal
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,

    /// Maximum number of records kept in history
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,

    /// Persist the history after each change and journal every calculation
    #[serde(
        default = "default_true",
        deserialize_with = "deserialize_flexible_bool"
    )]
    pub auto_save: bool,

    /// Decimal digits kept in results
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Largest accepted operand magnitude
    #[serde(default = "default_max_input_value")]
    pub max_input_value: f64,

    /// Log file name inside `log_dir`
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// History file name inside `history_dir`
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// Journal file name inside `history_dir`
    #[serde(default = "default_journal_file")]
    pub journal_file: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log level configuration.
///
/// `default` applies to every module; `modules` overrides single targets,
/// e.g. `reckon::storage = "debug"`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,

    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_history_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_max_history_size() -> usize {
    crate::history::DEFAULT_MAX_HISTORY
}
fn default_true() -> bool {
    true
}
fn default_precision() -> u32 {
    6
}
fn default_max_input_value() -> f64 {
    crate::validation::DEFAULT_MAX_INPUT
}
fn default_log_file() -> String {
    "calculator.log".to_string()
}
fn default_history_file() -> String {
    "history.json".to_string()
}
fn default_journal_file() -> String {
    "journal.jsonl".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

/// Accepts booleans, `0`/`1`, and `true/false/yes/no/on/off` strings.
fn deserialize_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flexible::deserialize(deserializer)? {
        Flexible::Bool(b) => Ok(b),
        Flexible::Int(i) => Ok(i != 0),
        Flexible::Text(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, found '{other}'"
            ))),
        },
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_dir: default_log_dir(),
            history_dir: default_history_dir(),
            max_history_size: default_max_history_size(),
            auto_save: true,
            precision: default_precision(),
            max_input_value: default_max_input_value(),
            log_file: default_log_file(),
            history_file: default_history_file(),
            journal_file: default_journal_file(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// Uses `config_path` when given, otherwise the nearest
    /// `.reckon/settings.toml` in the current directory or its ancestors.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::find_workspace_config)
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings: Settings = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Double underscore (__) separates nested levels,
            // single underscores stay part of the field name
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check the invariants the calculator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size < 1 {
            return Err(ConfigError::Invalid {
                field: "max_history_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.max_input_value.is_finite() || self.max_input_value <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_input_value",
                reason: format!("must be a positive number, got {}", self.max_input_value),
            });
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid {
                field: "precision",
                reason: format!(
                    "at most {MAX_PRECISION} digits are meaningful, got {}",
                    self.precision
                ),
            });
        }
        Ok(())
    }

    /// Find `.reckon/settings.toml` searching from the current directory up to root.
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_dir.join(&self.history_file)
    }

    pub fn journal_path(&self) -> PathBuf {
        self.history_dir.join(&self.journal_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in `.reckon/`.
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
