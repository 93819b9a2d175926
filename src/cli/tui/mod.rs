//! Interactive task board
//!
//! A single-screen ratatui front end over [`Board`]: add form, filter
//! selectors, and the projected task list.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::Board;
use crate::storage::TuiConfig;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, board: Board, config: &TuiConfig) -> Result<()> {
    output.verbose_ctx(
        "tui",
        &format!(
            "Starting board: priority={}, completion={}, tick={}ms",
            board.input().priority_filter(),
            board.input().completion_filter(),
            config.tick_rate_ms
        ),
    );

    let mut app = App::new(board, config.confirm_delete);
    let events = EventHandler::new(Duration::from_millis(config.tick_rate_ms.max(1)));

    let mut terminal = ui::init_terminal()?;

    // The terminal must come back even if the loop panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            output.verbose_ctx(
                "tui",
                &format!("Exited with {} task(s) on the board", app.board().tasks().len()),
            );
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
