//! Main TUI application: terminal ownership and the event loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::event::{AppEvent, ClipboardManager, EventHandler};
use super::state::ChatState;
use super::ui;
use crate::config::Settings;
use crate::dispatch::{Dispatcher, HttpQueryClient, Reply};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Main TUI application
pub struct ChatApp {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Terminal input
    events: EventHandler,
    /// Finished dispatches
    replies: mpsc::UnboundedReceiver<Reply>,
    /// Clipboard manager
    clipboard: ClipboardManager,
    /// Everything the UI draws
    pub state: ChatState,
}

impl ChatApp {
    /// Create the app and take over the terminal
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = HttpQueryClient::new(settings.endpoint.clone(), settings.timeout())?;
        let (dispatcher, replies) = Dispatcher::new(Arc::new(client));
        let state = ChatState::new(settings, dispatcher);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            events: EventHandler::new(TICK_RATE),
            replies,
            clipboard: ClipboardManager::new(),
            state,
        })
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(endpoint = %self.state.endpoint, "chat session started");

        while !self.state.should_quit {
            self.terminal
                .draw(|frame| ui::render(frame, &mut self.state))?;

            tokio::select! {
                biased; // Commit replies before more input

                Some(reply) = self.replies.recv() => {
                    tracing::debug!(seq = reply.ticket.seq(), "reply received");
                    self.state.apply_reply(reply);
                }
                maybe_event = self.events.next() => {
                    match maybe_event {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }
            }
        }

        tracing::info!(
            messages = self.state.conversation.len(),
            "chat session ended"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if key.kind == KeyEventKind::Press
                    && key.modifiers == KeyModifiers::CONTROL
                    && key.code == KeyCode::Char('v')
                {
                    if let Some(text) = self.clipboard.paste() {
                        self.state.insert_text(&text);
                    }
                    return;
                }
                self.state.handle_key(key);
            }
            AppEvent::Click { row, col } => self.state.handle_click(col, row),
            AppEvent::Scroll { row, col, up } => self.state.handle_scroll(col, row, up),
            AppEvent::Paste(text) => self.state.insert_text(&text),
            AppEvent::Resize(..) | AppEvent::Tick => {}
        }
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}
