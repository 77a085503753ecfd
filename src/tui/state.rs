//! Chat view state
//!
//! Everything the UI draws and mutates, minus the terminal itself.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use super::hit_test::{ClickTarget, HitTestRegistry};
use super::theme::Theme;
use super::widgets::MessageListState;
use crate::chat::Conversation;
use crate::config::Settings;
use crate::dispatch::{Dispatcher, Reply};

/// Lines moved per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Chat view state
pub struct ChatState {
    /// Color theme
    pub theme: Theme,
    /// Query endpoint, shown in the status bar
    pub endpoint: String,
    /// strftime pattern for date fields
    pub date_format: String,
    /// Message log
    pub conversation: Conversation,
    /// Sends questions in the background
    pub dispatcher: Dispatcher,
    /// Text input
    pub input: TextArea<'static>,
    /// Message list scroll state
    pub message_list_state: MessageListState,
    /// Hit test registry for mouse interaction
    pub hit_registry: HitTestRegistry,
    /// Show help overlay
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl ChatState {
    pub fn new(settings: &Settings, dispatcher: Dispatcher) -> Self {
        let theme = Theme::dark();
        let input = build_input(&theme);

        Self {
            theme,
            endpoint: settings.endpoint.clone(),
            date_format: settings.date_format.clone(),
            conversation: Conversation::new(),
            dispatcher,
            input,
            message_list_state: MessageListState::default(),
            hit_registry: HitTestRegistry::new(),
            show_help: false,
            should_quit: false,
        }
    }

    /// Current contents of the input field
    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    /// Submit the input. Blank input is ignored and left in place.
    pub fn send(&mut self) {
        let text = self.input_text();
        let Some(ticket) = self.conversation.submit(&text) else {
            return;
        };

        self.input = build_input(&self.theme);
        self.dispatcher.dispatch(ticket);
        self.sync_scroll();
    }

    /// Commit a finished dispatch
    pub fn apply_reply(&mut self, reply: Reply) {
        self.conversation.resolve(reply.ticket, reply.content);
        self.sync_scroll();
    }

    /// Insert text at the cursor. The input is single-line, so line breaks
    /// become spaces.
    pub fn insert_text(&mut self, text: &str) {
        self.input.insert_str(text.replace(['\r', '\n'], " "));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.should_quit = true;
            }
            (_, KeyCode::F(1)) => {
                self.show_help = !self.show_help;
            }
            (_, KeyCode::Esc) => {
                self.show_help = false;
            }
            (_, KeyCode::Enter)
            | (KeyModifiers::CONTROL, KeyCode::Char('m'))
            | (KeyModifiers::CONTROL, KeyCode::Char('j')) => {
                self.send();
            }
            (_, KeyCode::PageUp) => {
                let page = self.page_size();
                self.message_list_state.scroll_up(page);
            }
            (_, KeyCode::PageDown) => {
                let page = self.page_size();
                self.message_list_state.scroll_down(page);
            }
            (KeyModifiers::NONE, KeyCode::Up) => self.message_list_state.scroll_up(1),
            (KeyModifiers::NONE, KeyCode::Down) => self.message_list_state.scroll_down(1),
            // Absorb typing while help is open
            _ if self.show_help => {}
            _ => {
                self.input.input(key);
            }
        }
    }

    pub fn handle_click(&mut self, col: u16, row: u16) {
        if let Some(ClickTarget::SendButton) = self.hit_registry.hit_test(col, row) {
            self.send();
        }
    }

    pub fn handle_scroll(&mut self, col: u16, row: u16, up: bool) {
        if self.hit_registry.hit_test(col, row) != Some(ClickTarget::MessageArea) {
            return;
        }
        if up {
            self.message_list_state.scroll_up(WHEEL_LINES);
        } else {
            self.message_list_state.scroll_down(WHEEL_LINES);
        }
    }

    fn page_size(&self) -> usize {
        self.message_list_state.viewport_height.saturating_sub(1).max(1)
    }

    fn sync_scroll(&mut self) {
        if self.conversation.take_scroll_request() {
            self.message_list_state.scroll_to_bottom();
        }
    }
}

fn build_input(theme: &Theme) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(Style::default());
    input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    input.set_placeholder_text("Type your message...");
    input.set_placeholder_style(Style::default().fg(theme.text_muted));
    input.set_style(Style::default().fg(theme.text).bg(theme.input_background));
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Content, Role};
    use crate::dispatch::{DispatchError, QueryClient};
    use async_trait::async_trait;
    use ratatui::layout::Rect;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct EchoClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QueryClient for EchoClient {
        async fn query(&self, question: &str) -> Result<Content, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Content::text(format!("echo: {}", question)))
        }
    }

    fn state() -> (ChatState, mpsc::UnboundedReceiver<Reply>, Arc<EchoClient>) {
        let client = Arc::new(EchoClient {
            calls: AtomicUsize::new(0),
        });
        let (dispatcher, replies) = Dispatcher::new(client.clone());
        (ChatState::new(&Settings::default(), dispatcher), replies, client)
    }

    fn press(state: &mut ChatState, code: KeyCode) {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(state: &mut ChatState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_enter_sends_and_clears_input() {
        let (mut state, mut replies, client) = state();
        type_text(&mut state, "hello");
        assert_eq!(state.input_text(), "hello");

        press(&mut state, KeyCode::Enter);

        assert_eq!(state.input_text(), "");
        assert_eq!(state.conversation.len(), 1);
        assert_eq!(state.conversation.messages()[0].role(), Role::User);

        let reply = replies.recv().await.unwrap();
        state.apply_reply(reply);

        assert_eq!(state.conversation.len(), 2);
        assert_eq!(
            state.conversation.messages()[1].content().as_text(),
            Some("echo: hello")
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert!(state.message_list_state.follow);
    }

    #[tokio::test]
    async fn test_whitespace_input_left_unchanged() {
        let (mut state, mut replies, client) = state();
        type_text(&mut state, "   ");

        press(&mut state, KeyCode::Enter);
        tokio::task::yield_now().await;

        assert_eq!(state.input_text(), "   ");
        assert!(state.conversation.is_empty());
        assert!(replies.try_recv().is_err());
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_button_click_matches_enter() {
        let (mut state, mut replies, _client) = state();
        state
            .hit_registry
            .register(Rect::new(70, 20, 10, 3), ClickTarget::SendButton);
        type_text(&mut state, "find members");

        state.handle_click(0, 0);
        assert!(state.conversation.is_empty());

        state.handle_click(72, 21);
        assert_eq!(state.conversation.len(), 1);
        assert_eq!(state.input_text(), "");

        let reply = replies.recv().await.unwrap();
        state.apply_reply(reply);
        assert_eq!(state.conversation.len(), 2);
    }

    #[tokio::test]
    async fn test_input_stays_enabled_while_waiting() {
        let (mut state, mut replies, _client) = state();
        type_text(&mut state, "one");
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "two");
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.conversation.len(), 2);
        assert_eq!(state.conversation.in_flight(), 2);

        for _ in 0..2 {
            let reply = replies.recv().await.unwrap();
            state.apply_reply(reply);
        }
        assert_eq!(state.conversation.len(), 4);
        assert_eq!(state.conversation.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_paste_flattens_newlines() {
        let (mut state, _replies, _client) = state();
        state.insert_text("line one\nline two");
        assert_eq!(state.input_text(), "line one line two");
    }

    #[tokio::test]
    async fn test_help_toggle_and_quit() {
        let (mut state, _replies, _client) = state();

        press(&mut state, KeyCode::F(1));
        assert!(state.show_help);
        type_text(&mut state, "x");
        assert_eq!(state.input_text(), "");
        press(&mut state, KeyCode::Esc);
        assert!(!state.show_help);

        state.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[tokio::test]
    async fn test_wheel_scroll_only_over_messages() {
        let (mut state, _replies, _client) = state();
        state.message_list_state.content_height = 50;
        state.message_list_state.viewport_height = 10;
        state.message_list_state.offset = 40;
        state
            .hit_registry
            .register(Rect::new(0, 1, 80, 10), ClickTarget::MessageArea);

        state.handle_scroll(5, 30, true);
        assert_eq!(state.message_list_state.offset, 40);

        state.handle_scroll(5, 5, true);
        assert_eq!(state.message_list_state.offset, 37);
        assert!(!state.message_list_state.follow);
    }
}
