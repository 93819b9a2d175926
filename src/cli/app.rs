//! Main CLI application structure

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use super::output::{Output, OutputFormat};
use super::{replay, tui};
use crate::domain::{Board, CompletionFilter, PriorityFilter};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(author, version, about = "A single-screen task board with priority and completion filters")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the global one
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board (default)
    Ui {
        /// Initial priority filter (all, high, medium, low)
        #[arg(long)]
        priority: Option<PriorityFilter>,

        /// Initial completion filter (all, completed, incomplete)
        #[arg(long)]
        completion: Option<CompletionFilter>,
    },

    /// Replay a script of board actions and print the result
    Replay {
        /// Script file (reads stdin when omitted or '-')
        file: Option<PathBuf>,

        /// Initial priority filter (all, high, medium, low)
        #[arg(long)]
        priority: Option<PriorityFilter>,

        /// Initial completion filter (all, completed, incomplete)
        #[arg(long)]
        completion: Option<CompletionFilter>,
    },

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the path of the global configuration file
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parse arguments and run the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // `config path` and `config init` must work before the file exists
    let config = match &cli.command {
        Some(Commands::Config(ConfigCommands::Path | ConfigCommands::Init { .. })) => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("Taskboard starting");
    if let Some(path) = &cli.config {
        output.verbose_ctx("config", &format!("Using config file: {}", path.display()));
    }

    match cli.command {
        None => {
            let board = initial_board(&config, None, None);
            tui::run(&output, board, &config.tui)?
        }
        Some(Commands::Ui { priority, completion }) => {
            let board = initial_board(&config, priority, completion);
            tui::run(&output, board, &config.tui)?
        }
        Some(Commands::Replay { file, priority, completion }) => {
            let board = initial_board(&config, priority, completion);
            replay::run(&output, file.as_deref(), board)?
        }
        Some(Commands::Config(cmd)) => run_config(&output, cmd, cli.config.as_deref(), &config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Builds an empty board with filters from the command line, falling back to config
fn initial_board(
    config: &Config,
    priority: Option<PriorityFilter>,
    completion: Option<CompletionFilter>,
) -> Board {
    Board::with_filters(
        priority.unwrap_or(config.filters.priority),
        completion.unwrap_or(config.filters.completion),
    )
}

#[derive(Serialize)]
struct ConfigPathReport {
    path: Option<PathBuf>,
    exists: bool,
}

fn run_config(
    output: &Output,
    cmd: ConfigCommands,
    explicit: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let path = explicit.map(Path::to_path_buf).or_else(Config::global_config_path);

    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                output.data(config);
            } else {
                print!("{}", config.to_toml()?);
            }
        }

        ConfigCommands::Path => {
            let exists = path.as_deref().is_some_and(|p| p.is_file());
            if output.is_json() {
                output.data(&ConfigPathReport { path, exists });
            } else {
                match path {
                    Some(p) => println!("{}", p.display()),
                    None => anyhow::bail!("Could not determine a configuration directory"),
                }
            }
        }

        ConfigCommands::Init { force } => {
            let path = path.context("Could not determine a configuration directory")?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, Config::default().to_toml()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            output.verbose_ctx("config", &format!("Wrote defaults to {}", path.display()));
            output.success(&format!("Created configuration at {}", path.display()));
        }
    }

    Ok(())
}
