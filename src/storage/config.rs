//! Configuration handling for Taskboard
//!
//! Configuration is read from the file named by `--config` /
//! `TASKBOARD_CONFIG`, or else from `~/.config/taskboard/config.toml`
//! (platform equivalent). A missing default file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::{CompletionFilter, PriorityFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Initial filter selections
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// Priority filter applied at startup
    pub priority: PriorityFilter,

    /// Completion filter applied at startup
    pub completion: CompletionFilter,
}

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// Ask for confirmation before deleting a task
    pub confirm_delete: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            confirm_delete: false,
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Startup filters
    pub filters: FilterConfig,

    /// TUI settings
    pub tui: TuiConfig,
}

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskboard", "taskboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the path of the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration
    ///
    /// An explicit path must exist. Without one, the global file is used
    /// if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::load_from(path);
        }

        match Self::global_config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Renders the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
