//! TUI color theme

use ratatui::style::Color;

/// TUI color theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub user_bubble: Color,
    pub user_text: Color,
    pub bot_bubble: Color,
    pub bot_text: Color,
    pub card_background: Color,
    pub card_border: Color,
    pub card_key: Color,
    pub input_background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 30, 30),
            text: Color::Rgb(212, 212, 212),
            text_muted: Color::Rgb(128, 128, 128),
            border: Color::Rgb(60, 60, 60),
            accent: Color::Rgb(59, 130, 246),
            user_bubble: Color::Rgb(59, 130, 246),
            user_text: Color::White,
            bot_bubble: Color::Rgb(55, 55, 58),
            bot_text: Color::Rgb(230, 230, 230),
            card_background: Color::Rgb(45, 45, 48),
            card_border: Color::Rgb(90, 90, 95),
            card_key: Color::Rgb(156, 220, 254),
            input_background: Color::Rgb(37, 37, 38),
        }
    }
}
