//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `ui` (default) | Interactive board in the terminal |
//! | `replay [FILE]` | Run a script of board actions, print the projection |
//! | `config show/path/init` | Inspect or create the configuration file |
//!
//! ## Output Formats
//!
//! `--format text` (default, or `default_format` from config) prints
//! human-readable output; `--format json` prints machine-parseable JSON.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for diagnostics on stderr:
//! ```bash
//! taskboard --verbose replay actions.txt
//! ```
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod replay;
mod tui;

pub use app::{Cli, Commands, ConfigCommands, run};
pub use output::{Output, OutputFormat};
pub use replay::{ScriptCommand, ScriptError};
