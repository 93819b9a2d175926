//! Event handling for the TUI

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Terminal events
#[derive(Debug, PartialEq)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal was resized; the next draw picks up the new size
    Resize,
    /// No input within one tick
    Tick,
}

/// Maps a raw crossterm event to one the app cares about
///
/// Key releases and repeats are dropped so each keystroke acts once.
fn translate(evt: CrosstermEvent) -> Option<Event> {
    match evt {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}

/// Polls the terminal on a background thread and forwards events
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler that emits a tick after `tick_rate` of silence
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(evt) => translate(evt),
                    Err(_) => None,
                }
            } else {
                Some(Event::Tick)
            };

            // The receiver is gone once the app loop has exited
            if let Some(evt) = next {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
