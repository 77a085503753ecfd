//! Conversation state and message types.

mod conversation;
mod message;

pub use conversation::{Conversation, DispatchTicket};
pub use message::{Content, FieldValue, Message, Record, Role};
