//! Status bar widget
//!
//! Format: ` MODE  │ endpoint` on the left, keybind hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Status bar with request state and hints
pub struct StatusBar<'a> {
    theme: &'a Theme,
    endpoint: &'a str,
    in_flight: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme, endpoint: &'a str, in_flight: usize) -> Self {
        Self {
            theme,
            endpoint,
            in_flight,
        }
    }

    fn mode_info(&self) -> (String, Color) {
        match self.in_flight {
            0 => ("READY".to_string(), Color::Rgb(72, 185, 100)),
            n => (format!("AWAITING {}", n), Color::Rgb(255, 193, 7)),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.background));

        let (mode_text, mode_color) = self.mode_info();
        let muted = Style::default().fg(self.theme.text_muted);

        let left = Line::from(vec![
            Span::styled(
                format!(" {} ", mode_text),
                Style::default()
                    .fg(Color::Black)
                    .bg(mode_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", muted),
            Span::styled(self.endpoint.to_string(), muted),
        ]);
        buf.set_line(area.x, area.y, &left, area.width);

        // Right-align hints when they fit
        let hints = Line::from(Span::styled("Enter send · F1 help · Ctrl+Q quit ", muted));
        let width = hints.width() as u16;
        if left.width() as u16 + width < area.width {
            buf.set_line(area.x + area.width - width, area.y, &hints, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_ready_state() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme, "http://localhost:8000/member/query", 0).render(area, &mut buf);

        let text = row_text(&buf);
        assert!(text.starts_with(" READY "));
        assert!(text.contains("localhost:8000"));
        assert!(text.contains("F1 help"));
    }

    #[test]
    fn test_awaiting_state_and_narrow_width() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme, "http://localhost:8000/member/query", 2).render(area, &mut buf);

        let text = row_text(&buf);
        assert!(text.starts_with(" AWAITING 2 "));
        assert!(!text.contains("F1 help"));
    }
}
