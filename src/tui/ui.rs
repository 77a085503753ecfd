//! Main UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::hit_test::ClickTarget;
use super::state::ChatState;
use super::widgets::{MessageList, StatusBar};

/// Width of the send button, borders included
const SEND_BUTTON_WIDTH: u16 = 10;

/// Render the entire UI
pub fn render(frame: &mut Frame, state: &mut ChatState) {
    state.hit_registry.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Messages
            Constraint::Length(1), // Status
            Constraint::Length(3), // Input
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);
    render_messages(frame, state, chunks[1]);
    frame.render_widget(
        StatusBar::new(
            &state.theme,
            &state.endpoint,
            state.conversation.in_flight(),
        ),
        chunks[2],
    );
    render_input(frame, state, chunks[3]);

    if state.show_help {
        let area = frame.area();
        render_help(frame, state, area);
    }
}

fn render_header(frame: &mut Frame, state: &ChatState, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Member Chat",
            Style::default()
                .fg(state.theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " │ ask about members in plain language",
            Style::default().fg(state.theme.text_muted),
        ),
    ]))
    .style(Style::default().bg(state.theme.background));

    frame.render_widget(header, area);
}

fn render_messages(frame: &mut Frame, state: &mut ChatState, area: Rect) {
    state
        .hit_registry
        .register(area, ClickTarget::MessageArea);

    if state.conversation.is_empty() {
        let muted = Style::default().fg(state.theme.text_muted);
        let welcome = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to Member Chat",
                Style::default()
                    .fg(state.theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Ask a question below, e.g. \"members born in 1990\"",
                muted,
            )),
            Line::from(Span::styled(
                "Press F1 for keyboard shortcuts",
                muted.add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center);

        frame.render_widget(welcome, area);
        return;
    }

    let message_list = MessageList::new(
        state.conversation.messages(),
        &state.theme,
        &state.date_format,
    )
    .awaiting(state.conversation.in_flight());

    frame.render_stateful_widget(message_list, area, &mut state.message_list_state);
}

fn render_input(frame: &mut Frame, state: &mut ChatState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SEND_BUTTON_WIDTH)])
        .split(area);

    let border = Style::default().fg(state.theme.border);
    state.input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Message "),
    );
    frame.render_widget(&state.input, chunks[0]);

    let button = Paragraph::new(Line::from(Span::styled(
        "Send",
        Style::default()
            .fg(state.theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(state.theme.accent)),
    );
    frame.render_widget(button, chunks[1]);

    state
        .hit_registry
        .register(chunks[1], ClickTarget::SendButton);
}

fn render_help(frame: &mut Frame, state: &ChatState, area: Rect) {
    let key = Style::default().fg(state.theme.accent);
    let rows = [
        (" Enter       ", "Send question"),
        (" Click Send  ", "Send question"),
        (" Ctrl+V      ", "Paste"),
        (" ↑/↓         ", "Scroll messages"),
        (" PgUp/PgDn   ", "Scroll a page"),
        (" Mouse wheel ", "Scroll messages"),
        (" F1          ", "Toggle this help"),
        (" Esc         ", "Close help"),
        (" Ctrl+Q      ", "Quit"),
    ];

    let mut help_lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_lines.extend(
        rows.iter()
            .map(|(k, what)| Line::from(vec![Span::styled(*k, key), Span::raw(*what)])),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state.theme.accent))
        .title(" Help ");

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .alignment(Alignment::Left);

    let area = centered_rect(60, 50, area);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
