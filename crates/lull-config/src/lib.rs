//! TOML configuration for lull.
//!
//! Layers a config file over built-in defaults with figment and translates
//! the result into the runtime types `lull-core` consumes
//! ([`NotifierConfig`], [`QueueMode`]).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lull_core::NotifierConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<lull_core::CoreError> for ConfigError {
    fn from(err: lull_core::CoreError) -> Self {
        match err {
            lull_core::CoreError::InvalidConfig { field, reason } => Self::Validation { field, reason },
            other => Self::Validation {
                field: "config".into(),
                reason: other.to_string(),
            },
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// `[notifier]`: `interval_ms` between drains.
    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub queue: QueueSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueueSection {
    #[serde(default)]
    pub mode: QueueMode,
}

/// Which locking strategy hosts should build queues with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueMode {
    /// Mutex-guarded, safe to share across threads.
    #[default]
    Shared,
    /// Unsynchronized, single thread only.
    Local,
}

impl Config {
    /// Validated notifier settings.
    pub fn notifier_config(&self) -> Result<NotifierConfig, ConfigError> {
        self.notifier.validate()?;
        Ok(self.notifier)
    }

    pub fn queue_mode(&self) -> QueueMode {
        self.queue.mode
    }

    /// Render as pretty TOML, the same shape the loader accepts.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "lull", "lull").map_or_else(
        || PathBuf::from(".lull").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path`, or from [`config_path`] when `None`.
///
/// A missing file yields the defaults; a malformed one is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    extract(Figment::new().merge(Serialized::defaults(Config::default())).merge(Toml::file(path)))
}

/// Load config from an in-memory TOML document.
pub fn from_toml_str(toml: &str) -> Result<Config, ConfigError> {
    extract(Figment::new().merge(Serialized::defaults(Config::default())).merge(Toml::string(toml)))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    let config: Config = figment.extract()?;
    config.notifier_config()?;
    Ok(config)
}
