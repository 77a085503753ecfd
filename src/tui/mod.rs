//! Terminal chat interface
//!
//! Full-screen conversation view with mouse support.

mod app;
mod event;
mod state;
mod theme;
mod ui;

pub mod widgets;

pub use app::ChatApp;
pub use theme::Theme;

use anyhow::Result;

use crate::config::Settings;

/// Run the TUI application
pub async fn run(settings: &Settings) -> Result<()> {
    let mut app = ChatApp::new(settings)?;
    app.run().await
}
