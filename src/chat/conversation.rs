//! Conversation state
//!
//! Append-only message log for the lifetime of the view. Sending is a
//! two-phase append: [`Conversation::submit`] commits the user message and
//! hands out a [`DispatchTicket`]; [`Conversation::resolve`] consumes that
//! ticket and commits exactly one bot message.

use tracing::debug;

use super::message::{Content, Message};

/// Proof that a question was submitted and still owes a bot reply.
///
/// Not `Clone`: each ticket resolves once.
#[derive(Debug)]
pub struct DispatchTicket {
    seq: u64,
    question: String,
}

impl DispatchTicket {
    /// Send order, starting at 1
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Text as typed by the user
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Ordered message log
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    sent: u64,
    in_flight: usize,
    scroll_requested: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message at the end and ask the view to follow it
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_requested = true;
    }

    /// Commit the user's message. Returns `None` (and changes nothing) when
    /// the input is empty or whitespace only.
    pub fn submit(&mut self, input: &str) -> Option<DispatchTicket> {
        if input.trim().is_empty() {
            return None;
        }

        self.append(Message::user(input));
        self.sent += 1;
        self.in_flight += 1;
        debug!(seq = self.sent, in_flight = self.in_flight, "question submitted");

        Some(DispatchTicket {
            seq: self.sent,
            question: input.to_string(),
        })
    }

    /// Commit the bot reply owed by `ticket`
    pub fn resolve(&mut self, ticket: DispatchTicket, content: Content) {
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(seq = ticket.seq, in_flight = self.in_flight, "reply committed");
        self.append(Message::bot(content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of submitted questions still waiting for a reply
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns true once after each append
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}
