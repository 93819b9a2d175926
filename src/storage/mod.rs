//! # Storage Layer
//!
//! Tasks live only in memory. The one thing Taskboard reads from disk is
//! its configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `--config PATH`, `$TASKBOARD_CONFIG`, or `<config dir>/taskboard/config.toml` |
//!
//! ## Key Types
//!
//! - [`Config`] - User configuration (output format, startup filters, TUI settings)

mod config;

pub use config::{Config, ConfigError, FilterConfig, TuiConfig};
