//! Replay a script of user actions against a fresh board
//!
//! Each non-blank line is one action. `#` starts a comment line.
//!
//! ```text
//! add high Buy milk
//! add low Call Bob
//! toggle 1
//! filter completion incomplete
//! show
//! ```

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use super::output::Output;
use crate::domain::{
    Board, CompletionFilter, FilterError, IdError, Priority, PriorityFilter, Task, TaskError, TaskId,
};

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Set the pending title
    Title(String),
    /// Set the pending priority
    Priority(Priority),
    /// Press "Add Task" with the pending fields
    Add,
    /// Fill in the form, then press "Add Task"
    AddWith(Priority, String),
    Toggle(TaskId),
    Delete(TaskId),
    PriorityFilter(PriorityFilter),
    CompletionFilter(CompletionFilter),
    /// Print the current projection
    Show,
}

/// Splits off the first word, dropping exactly one separator after it
fn split_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(pos) => {
            let sep_len = text[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
            (&text[..pos], &text[pos + sep_len..])
        }
        None => (text, ""),
    }
}

/// Parses a single script line; blank and comment lines yield `None`
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let text = text.trim_end_matches('\r').trim_start();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let invalid = |message: String| ScriptError::Invalid { line, message };

    let (keyword, rest) = split_word(text);
    let command = match keyword.to_lowercase().as_str() {
        "title" => ScriptCommand::Title(rest.to_string()),
        "priority" => {
            let priority = rest.trim().parse().map_err(|e: TaskError| invalid(e.to_string()))?;
            ScriptCommand::Priority(priority)
        }
        "add" => {
            let args = rest.trim_start();
            if args.trim().is_empty() {
                ScriptCommand::Add
            } else {
                let (priority, title) = split_word(args);
                let priority = priority
                    .parse()
                    .map_err(|e: TaskError| invalid(e.to_string()))?;
                ScriptCommand::AddWith(priority, title.to_string())
            }
        }
        "toggle" | "delete" => {
            let id: TaskId = rest
                .trim()
                .parse()
                .map_err(|e: IdError| invalid(e.to_string()))?;
            if keyword.eq_ignore_ascii_case("toggle") {
                ScriptCommand::Toggle(id)
            } else {
                ScriptCommand::Delete(id)
            }
        }
        "filter" => {
            let (which, value) = split_word(rest.trim_start());
            match which.to_lowercase().as_str() {
                "priority" => ScriptCommand::PriorityFilter(
                    value.trim().parse().map_err(|e: FilterError| invalid(e.to_string()))?,
                ),
                "completion" => ScriptCommand::CompletionFilter(
                    value.trim().parse().map_err(|e: FilterError| invalid(e.to_string()))?,
                ),
                other => {
                    return Err(invalid(format!(
                        "unknown filter '{}', expected 'priority' or 'completion'",
                        other
                    )))
                }
            }
        }
        "show" => ScriptCommand::Show,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: keyword.to_string(),
            })
        }
    };

    Ok(Some(command))
}

/// Parses a whole script, stopping at the first bad line
pub fn parse_script(script: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, text) in script.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, text)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Snapshot of what the list shows
#[derive(Debug, Serialize)]
struct ProjectionReport<'a> {
    priority_filter: PriorityFilter,
    completion_filter: CompletionFilter,
    total: usize,
    completed: usize,
    tasks: Vec<&'a Task>,
}

/// Applies one command to the board
///
/// A rejected add is reported as a notification and does not stop the
/// script.
pub fn apply(output: &Output, board: &mut Board, command: ScriptCommand) {
    match command {
        ScriptCommand::Title(title) => board.set_pending_title(title),
        ScriptCommand::Priority(priority) => board.set_pending_priority(priority),
        ScriptCommand::Add => add(output, board),
        ScriptCommand::AddWith(priority, title) => {
            board.set_pending_priority(priority);
            board.set_pending_title(title);
            add(output, board);
        }
        ScriptCommand::Toggle(id) => {
            if !board.toggle_completion(id) {
                output.verbose_ctx("replay", &format!("toggle: no task {}", id));
            }
        }
        ScriptCommand::Delete(id) => {
            if !board.delete_task(id) {
                output.verbose_ctx("replay", &format!("delete: no task {}", id));
            }
        }
        ScriptCommand::PriorityFilter(filter) => board.set_priority_filter(filter),
        ScriptCommand::CompletionFilter(filter) => board.set_completion_filter(filter),
        ScriptCommand::Show => print_projection(output, board),
    }
}

fn add(output: &Output, board: &mut Board) {
    match board.add_task() {
        Ok(id) => output.verbose_ctx("replay", &format!("added task {}", id)),
        Err(e) => output.error(&e.to_string()),
    }
}

/// Prints the board's current projection
pub fn print_projection(output: &Output, board: &Board) {
    let visible = board.visible();
    let input = board.input();

    if output.is_json() {
        output.data(&ProjectionReport {
            priority_filter: input.priority_filter(),
            completion_filter: input.completion_filter(),
            total: board.tasks().len(),
            completed: board.tasks().completed_count(),
            tasks: visible,
        });
        return;
    }

    println!(
        "Priority: {}  Completion: {}  ({} of {} shown, {} completed)",
        input.priority_filter(),
        input.completion_filter(),
        visible.len(),
        board.tasks().len(),
        board.tasks().completed_count()
    );

    if visible.is_empty() {
        println!("No tasks to show");
        return;
    }

    println!("{:<6} {:<9} {:<7} TITLE", "ID", "PRIORITY", "STATUS");
    for task in &visible {
        let status = if task.completed { "[x]" } else { "[ ]" };
        println!("{:<6} {:<9} {:<7} {}", task.id, task.priority, status, task.title);
    }
}

/// Runs a script from a file (or stdin for `None` / `-`)
pub fn run(output: &Output, source: Option<&Path>, mut board: Board) -> Result<()> {
    let script = match source {
        Some(path) if path != Path::new("-") => {
            output.verbose_ctx("replay", &format!("Reading script: {}", path.display()));
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read script: {}", path.display()))?
        }
        _ => {
            output.verbose_ctx("replay", "Reading script from stdin");
            io::read_to_string(io::stdin()).context("Failed to read script from stdin")?
        }
    };

    let commands = parse_script(&script)?;
    output.verbose_ctx("replay", &format!("Parsed {} commands", commands.len()));

    for command in commands {
        apply(output, &mut board, command);
    }

    print_projection(output, &board);
    Ok(())
}
