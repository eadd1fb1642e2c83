use crate::error::ConfigError;
use crate::grid::BoundsPolicy;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchConfig {
    /// `"reference"` keeps the extent column/row enterable, `"strict"` does not
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_enable_tick_log")]
    pub enable_tick_log: bool,
    #[serde(default = "default_tick_log_path")]
    pub tick_log_path: String,
}

// Default values
fn default_level() -> String { "info".to_string() }
fn default_enable_tick_log() -> bool { true }
fn default_tick_log_path() -> String { "tick_log.json".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            enable_tick_log: default_enable_tick_log(),
            tick_log_path: default_tick_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`. A missing file gives the
    /// defaults; a file that exists but does not parse is an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default("config.toml")
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Parsed log level, falling back to INFO for unknown names
    pub fn log_level(&self) -> tracing::Level {
        self.logging.level.parse().unwrap_or(tracing::Level::INFO)
    }
}
