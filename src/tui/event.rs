//! Event handling for keyboard, mouse, and terminal events

use std::time::Duration;

use arboard::Clipboard;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEventKind};
use tokio::sync::mpsc;

/// Terminal events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Left mouse button released
    Click { row: u16, col: u16 },
    /// Mouse wheel
    Scroll { row: u16, col: u16, up: bool },
    /// Terminal resize
    Resize(u16, u16),
    /// Poll timeout; triggers a redraw
    Tick,
    /// Bracketed paste
    Paste(String),
}

/// Polls the terminal on a dedicated thread and forwards events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(event) => translate(event),
                    Err(_) => None,
                }
            } else {
                Some(AppEvent::Tick)
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => Some(AppEvent::Click {
                row: mouse.row,
                col: mouse.column,
            }),
            MouseEventKind::ScrollUp => Some(AppEvent::Scroll {
                row: mouse.row,
                col: mouse.column,
                up: true,
            }),
            MouseEventKind::ScrollDown => Some(AppEvent::Scroll {
                row: mouse.row,
                col: mouse.column,
                up: false,
            }),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        _ => None,
    }
}

/// Clipboard access for paste
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self {
            clipboard: Clipboard::new().ok(),
        }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
