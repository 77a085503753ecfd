//! Dispatch error type.

use thiserror::Error;

/// Why a query did not produce a reply.
///
/// Only used for logging; every variant becomes the same fallback message
/// in the conversation.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Malformed reply: {0}")]
    Decode(String),
}
