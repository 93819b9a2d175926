//! Terminal setup and teardown

use std::io::{self, stdout, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen with the cursor hidden
pub fn init_terminal() -> Result<Terminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
    let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Put the terminal back the way the shell expects it
///
/// Every step is attempted even if an earlier one fails; the first
/// failure is returned.
pub fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}
