//! Message rendering.
//!
//! Turns a [`Message`] into styled terminal lines. User messages become
//! right-aligned bubbles, bot text becomes left-aligned bubbles and bot
//! records become a stack of bordered cards. Rendering is pure: the same
//! message and width always produce the same lines.

mod fields;

pub use fields::{
    format_field, is_date_field, is_valid_date_format, DEFAULT_DATE_FORMAT, INVALID_DATE,
    NULL_PLACEHOLDER,
};

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::chat::{Content, Message, Record, Role};
use crate::tui::Theme;

/// Widest a text bubble gets, border padding included
const BUBBLE_MAX_WIDTH: usize = 48;
/// Widest a record card gets, borders included
const CARD_MAX_WIDTH: usize = 64;
/// Shown for an empty record list
const NO_RESULTS: &str = "(no results)";

/// Renders messages with a theme and date format
#[derive(Debug, Clone, Copy)]
pub struct MessageRenderer<'a> {
    theme: &'a Theme,
    date_format: &'a str,
}

impl<'a> MessageRenderer<'a> {
    pub fn new(theme: &'a Theme, date_format: &'a str) -> Self {
        Self { theme, date_format }
    }

    /// Lines for one message at the given viewport width
    pub fn render(&self, message: &Message, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let alignment = match message.role() {
            Role::User => Alignment::Right,
            Role::Bot => Alignment::Left,
        };

        match message.content() {
            Content::Text(text) => {
                let style = match message.role() {
                    Role::User => Style::default()
                        .fg(self.theme.user_text)
                        .bg(self.theme.user_bubble),
                    Role::Bot => Style::default()
                        .fg(self.theme.bot_text)
                        .bg(self.theme.bot_bubble),
                };
                bubble(text, width, style, alignment)
            }
            Content::Records(records) if records.is_empty() => vec![Line::from(Span::styled(
                NO_RESULTS,
                Style::default()
                    .fg(self.theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(alignment)],
            Content::Records(records) => records
                .iter()
                .flat_map(|record| self.card(record, width))
                .map(|line| line.alignment(alignment))
                .collect(),
        }
    }

    fn card(&self, record: &Record, width: usize) -> Vec<Line<'static>> {
        let border = Style::default()
            .fg(self.theme.card_border)
            .bg(self.theme.card_background);
        let key_style = Style::default()
            .fg(self.theme.card_key)
            .bg(self.theme.card_background)
            .add_modifier(Modifier::BOLD);
        let value_style = Style::default()
            .fg(self.theme.text)
            .bg(self.theme.card_background);

        let max_inner = width.min(CARD_MAX_WIDTH).saturating_sub(4).max(1);
        let rows: Vec<(String, String)> = record
            .fields()
            .map(|(key, value)| (key.to_string(), format_field(key, value, self.date_format)))
            .collect();
        let inner = rows
            .iter()
            .map(|(key, value)| key.width() + 2 + value.width())
            .max()
            .unwrap_or(0)
            .clamp(1, max_inner);

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(Line::from(Span::styled(
            format!("╭{}╮", "─".repeat(inner + 2)),
            border,
        )));

        for (key, value) in &rows {
            let label = format!("{}:", key);
            let text = format!("{} {}", label, value);
            for (i, part) in textwrap::wrap(&text, inner).into_iter().enumerate() {
                let mut spans = vec![Span::styled("│ ", border)];
                let used = part.width();
                match part.strip_prefix(label.as_str()) {
                    Some(rest) if i == 0 => {
                        spans.push(Span::styled(label.clone(), key_style));
                        spans.push(Span::styled(rest.to_string(), value_style));
                    }
                    _ => spans.push(Span::styled(part.to_string(), value_style)),
                }
                spans.push(Span::styled(
                    " ".repeat(inner.saturating_sub(used)),
                    value_style,
                ));
                spans.push(Span::styled(" │", border));
                lines.push(Line::from(spans));
            }
        }

        lines.push(Line::from(Span::styled(
            format!("╰{}╯", "─".repeat(inner + 2)),
            border,
        )));
        lines
    }
}

/// Wrap text into a padded bubble
fn bubble(text: &str, width: usize, style: Style, alignment: Alignment) -> Vec<Line<'static>> {
    let max_inner = width.min(BUBBLE_MAX_WIDTH).saturating_sub(2).max(1);
    let wrapped = textwrap::wrap(text, max_inner);
    let inner = wrapped
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .clamp(1, max_inner);

    wrapped
        .into_iter()
        .map(|part| {
            let pad = inner.saturating_sub(part.width());
            Line::from(Span::styled(
                format!(" {}{} ", part, " ".repeat(pad)),
                style,
            ))
            .alignment(alignment)
        })
        .collect()
}

/// Flatten rendered lines to plain text, honoring right alignment
pub fn plain_text(lines: &[Line<'_>], width: u16) -> String {
    let width = width as usize;
    let mut out = String::new();

    for line in lines {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        if line.alignment == Some(Alignment::Right) {
            out.push_str(&" ".repeat(width.saturating_sub(text.width())));
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }

    out
}
