//! Board view: add form, filter bar, task list, status bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, ConfirmAction, InputMode};
use crate::cli::tui::utils::{centered_rect, truncate_str};
use crate::domain::Task;

/// Width taken by the per-row controls and padding
const CONTROLS_WIDTH: u16 = 32;

/// Draw the board layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Add form
            Constraint::Length(3), // Filters
            Constraint::Min(5),    // Tasks
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_form(frame, app, chunks[0]);
    draw_filters(frame, app, chunks[1]);
    draw_tasks(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if let InputMode::Alert(message) = app.input_mode() {
        draw_alert(frame, message, area);
    }
}

/// Style for a task row: crossed out when done, bold red when High
pub fn task_style(task: &Task) -> Style {
    let mut style = Style::default();
    if task.is_high_priority() {
        style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
    }
    if task.completed {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    style
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let editing = matches!(app.input_mode(), InputMode::EditTitle | InputMode::Alert(_));
    let input = app.board().input();

    let cursor = if editing { "_" } else { "" };
    let line = Line::from(vec![
        Span::styled("Title: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("{}{}", input.pending_title(), cursor)),
        Span::raw("   "),
        Span::styled("Priority: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("< {} >", input.pending_priority()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled("[Enter] Add Task", Style::default().fg(Color::Green)),
    ]);

    let border = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("New Task")
            .borders(Borders::ALL)
            .border_style(border),
    );

    frame.render_widget(paragraph, area);
}

fn draw_filters(frame: &mut Frame, app: &App, area: Rect) {
    let input = app.board().input();

    let line = Line::from(vec![
        Span::styled("Priority: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("[{}]", input.priority_filter()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" (p)   "),
        Span::styled("Completion Status: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("[{}]", input.completion_filter()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" (c)"),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().title("Filters").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn draw_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.board().tasks();
    let visible = app.visible_tasks();

    let title = format!(
        "Tasks ({}/{}, {} done)",
        visible.len(),
        tasks.len(),
        tasks.completed_count()
    );

    let footer = app
        .selected_task()
        .map(|t| format!(" #{} added {} ", t.id, t.created_at.format("%H:%M:%S")))
        .unwrap_or_default();

    let block = Block::default()
        .title(title)
        .title_bottom(footer)
        .borders(Borders::ALL);

    if visible.is_empty() {
        let message = if tasks.is_empty() {
            "No tasks yet. Press 'a' to add one."
        } else {
            "No tasks match the current filters."
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let max_title = area.width.saturating_sub(CONTROLS_WIDTH).max(10) as usize;
    let control = Style::default().fg(Color::DarkGray);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let label = format!("{} - {}", truncate_str(&task.title, max_title), task.priority);
            ListItem::new(Line::from(vec![
                Span::styled(label, task_style(task)),
                Span::raw("  "),
                Span::styled(format!("[{}]", task.toggle_label()), control),
                Span::raw(" "),
                Span::styled("[Delete]", control),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.selected_index());

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app.status_message().unwrap_or(
                "[a]dd [space]toggle [d]elete [p]riority filter [c]ompletion filter [?]help [q]uit",
            );
            (msg.to_string(), Style::default())
        }
        InputMode::EditTitle => (
            "Type a title  [Tab]priority  [Enter]add  [Esc]done".to_string(),
            Style::default().fg(Color::Green),
        ),
        InputMode::Confirm(ConfirmAction::DeleteTask(id)) => {
            let title = app
                .board()
                .tasks()
                .get(*id)
                .map(|t| t.title.as_str())
                .unwrap_or("?");
            (
                format!("Delete task #{} '{}'? [y/n]", id, title),
                Style::default().fg(Color::Yellow),
            )
        }
        InputMode::Alert(_) => ("Press Enter to dismiss".to_string(), Style::default().fg(Color::Red)),
    };

    let paragraph = Paragraph::new(format!("Taskboard {}", content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Modal notice over the whole screen
fn draw_alert(frame: &mut Frame, message: &str, area: Rect) {
    let popup = centered_rect(50, 5, area);

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()).alignment(Alignment::Center),
        Line::from(""),
        Line::from("[Enter] OK").alignment(Alignment::Center),
    ])
    .block(
        Block::default()
            .title("Notice")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
