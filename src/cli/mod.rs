//! One-shot mode: ask a single question and print the exchange.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;

use crate::chat::Conversation;
use crate::config::Settings;
use crate::dispatch::{Dispatcher, HttpQueryClient, QueryClient};
use crate::render::{plain_text, MessageRenderer};
use crate::tui::Theme;

/// Used when stdout is not a terminal
const FALLBACK_WIDTH: u16 = 80;

/// Ask `question` against the configured endpoint and print to stdout.
pub async fn ask(settings: &Settings, question: &str) -> Result<()> {
    let client = HttpQueryClient::new(settings.endpoint.clone(), settings.timeout())?;
    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(FALLBACK_WIDTH);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ask_with_client(
        Arc::new(client),
        question,
        &settings.date_format,
        width,
        &mut out,
    )
    .await
}

/// Run one exchange through `client` and write the rendered messages.
///
/// Blank questions write nothing. A failed dispatch still succeeds here;
/// the fallback reply is printed like any other.
pub async fn ask_with_client(
    client: Arc<dyn QueryClient>,
    question: &str,
    date_format: &str,
    width: u16,
    out: &mut impl Write,
) -> Result<()> {
    let mut conversation = Conversation::new();
    let Some(ticket) = conversation.submit(question) else {
        tracing::debug!("blank question, nothing to send");
        return Ok(());
    };

    let (dispatcher, _replies) = Dispatcher::new(client);
    let reply = dispatcher.resolve_now(ticket).await;
    conversation.resolve(reply.ticket, reply.content);

    let theme = Theme::dark();
    let renderer = MessageRenderer::new(&theme, date_format);
    for (i, message) in conversation.messages().iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let lines = renderer.render(message, width);
        out.write_all(plain_text(&lines, width).as_bytes())?;
    }
    out.flush()?;

    Ok(())
}
