//! Message list widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::StatefulWidget,
};

use crate::chat::Message;
use crate::render::MessageRenderer;
use crate::tui::theme::Theme;

/// Scroll state for the message list
#[derive(Debug)]
pub struct MessageListState {
    /// Current scroll offset (in lines)
    pub offset: usize,
    /// Total content height (in lines), updated on render
    pub content_height: usize,
    /// Viewport height, updated on render
    pub viewport_height: usize,
    /// Keep the last line in view on the next render
    pub follow: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self {
            offset: 0,
            content_height: 0,
            viewport_height: 0,
            follow: true,
        }
    }
}

impl MessageListState {
    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.min(self.max_offset()).saturating_sub(amount);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + amount).min(max_offset);
        self.follow = self.offset >= max_offset;
    }

    /// Jump to the end; resolved against the real height at render time
    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
        self.offset = self.max_offset();
    }
}

/// Widget for rendering the conversation
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    renderer: MessageRenderer<'a>,
    awaiting: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme, date_format: &'a str) -> Self {
        Self {
            messages,
            theme,
            renderer: MessageRenderer::new(theme, date_format),
            awaiting: 0,
        }
    }

    /// Number of replies still pending
    pub fn awaiting(mut self, count: usize) -> Self {
        self.awaiting = count;
        self
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for msg in self.messages {
            lines.extend(self.renderer.render(msg, width));
            // Spacer
            lines.push(Line::default());
        }

        if self.awaiting > 0 {
            let label = if self.awaiting == 1 {
                "● Waiting for reply...".to_string()
            } else {
                format!("● Waiting for {} replies...", self.awaiting)
            };
            lines.push(Line::from(Span::styled(
                label,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        lines
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let lines = self.lines(area.width);

        state.content_height = lines.len();
        state.viewport_height = area.height as usize;
        if state.follow {
            state.offset = state.max_offset();
        } else {
            state.offset = state.offset.min(state.max_offset());
        }

        for (row, line) in lines
            .iter()
            .skip(state.offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + row as u16;
            let width = (line.width() as u16).min(area.width);
            let x = match line.alignment {
                Some(Alignment::Right) => area.x + area.width - width,
                _ => area.x,
            };
            buf.set_line(x, y, line, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Content, Record};
    use crate::render::DEFAULT_DATE_FORMAT;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn render(
        messages: &[Message],
        awaiting: usize,
        area: Rect,
        state: &mut MessageListState,
    ) -> Buffer {
        let theme = Theme::dark();
        let mut buf = Buffer::empty(area);
        MessageList::new(messages, &theme, DEFAULT_DATE_FORMAT)
            .awaiting(awaiting)
            .render(area, &mut buf, state);
        buf
    }

    #[test]
    fn test_user_right_bot_left() {
        let messages = vec![
            Message::user("hello"),
            Message::bot(Content::text("hi there")),
        ];
        let mut state = MessageListState::default();
        let buf = render(&messages, 0, Rect::new(0, 0, 30, 10), &mut state);

        let user_row = row_text(&buf, 0);
        assert!(user_row.ends_with(" hello "));
        assert!(user_row.starts_with("    "));

        // Row 1 is the spacer
        let bot_row = row_text(&buf, 2);
        assert!(bot_row.starts_with(" hi there "));
    }

    #[test]
    fn test_cards_render_into_buffer() {
        let record = Record::new()
            .with_field("name", "Alice")
            .with_field("dob", "1990-01-01");
        let messages = vec![Message::bot(Content::Records(vec![record]))];
        let mut state = MessageListState::default();
        let buf = render(&messages, 0, Rect::new(0, 0, 40, 10), &mut state);

        assert!(row_text(&buf, 1).contains("name: Alice"));
        assert!(row_text(&buf, 2).contains("dob: 1/1/1990"));
    }

    #[test]
    fn test_follows_tail_when_content_overflows() {
        let messages: Vec<Message> = (0..10).map(|i| Message::user(format!("m{}", i))).collect();
        let mut state = MessageListState::default();
        let buf = render(&messages, 0, Rect::new(0, 0, 20, 4), &mut state);

        assert_eq!(state.content_height, 20);
        assert_eq!(state.offset, 16);
        assert!(row_text(&buf, 2).contains("m9"));
    }

    #[test]
    fn test_manual_scroll_stops_following() {
        let messages: Vec<Message> = (0..10).map(|i| Message::user(format!("m{}", i))).collect();
        let mut state = MessageListState::default();
        render(&messages, 0, Rect::new(0, 0, 20, 4), &mut state);

        state.scroll_up(4);
        assert!(!state.follow);
        render(&messages, 0, Rect::new(0, 0, 20, 4), &mut state);
        assert_eq!(state.offset, 12);

        state.scroll_down(100);
        assert!(state.follow);
        assert_eq!(state.offset, 16);
    }

    #[test]
    fn test_awaiting_indicator() {
        let messages = vec![Message::user("hello")];
        let mut state = MessageListState::default();
        let buf = render(&messages, 1, Rect::new(0, 0, 30, 5), &mut state);
        assert!(row_text(&buf, 2).contains("Waiting for reply"));

        let buf = render(&messages, 2, Rect::new(0, 0, 30, 5), &mut state);
        assert!(row_text(&buf, 2).contains("Waiting for 2 replies"));
    }
}
