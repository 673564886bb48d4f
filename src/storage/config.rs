//! Configuration handling
//!
//! Configuration is read from `config.toml` in the platform config directory
//! (e.g. `~/.config/podcast-scheduler/config.toml`). `PODCAST_CONFIG` points
//! at a different file. Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::EpisodeKind;

/// Catalogue file used when nothing else names one
pub const DEFAULT_EPISODES_FILE: &str = "episodes.txt";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "PODCAST_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalogue file to read and write
    pub episodes_file: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Kind used by `create` when none is given
    pub default_kind: EpisodeKind,
}

impl Config {
    /// Loads configuration from `PODCAST_CONFIG` or the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses configuration text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }

    /// Returns the config file that [`Config::load`] reads
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "podcast", "podcast-scheduler")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Picks the catalogue file: explicit path, then config, then the default
    pub fn episodes_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.episodes_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EPISODES_FILE))
    }
}
