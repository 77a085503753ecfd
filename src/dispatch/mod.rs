//! Query dispatch.
//!
//! Each submitted question is sent on its own task. Every task delivers
//! exactly one [`Reply`]: the parsed answer, or [`FALLBACK_REPLY`] when
//! anything goes wrong. Replies arrive in completion order.

mod answer;
mod client;
mod error;

pub use answer::{content_from_answer, parse_reply, QueryRequest};
pub use client::{HttpQueryClient, QueryClient};
pub use error::DispatchError;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::chat::{Content, DispatchTicket};

/// Bot message shown for any failed dispatch
pub const FALLBACK_REPLY: &str = "Error connecting to server";

/// Outcome of one dispatch, ready to be committed
#[derive(Debug)]
pub struct Reply {
    pub ticket: DispatchTicket,
    pub content: Content,
}

/// Sends questions and reports replies over a channel
pub struct Dispatcher {
    client: Arc<dyn QueryClient>,
    tx: mpsc::UnboundedSender<Reply>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver its replies arrive on
    pub fn new(client: Arc<dyn QueryClient>) -> (Self, mpsc::UnboundedReceiver<Reply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx }, rx)
    }

    /// Send in the background. Must be called inside a tokio runtime.
    pub fn dispatch(&self, ticket: DispatchTicket) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let reply = resolve(client.as_ref(), ticket).await;
            if tx.send(reply).is_err() {
                debug!("reply receiver dropped");
            }
        });
    }

    /// Send and wait for the reply inline
    pub async fn resolve_now(&self, ticket: DispatchTicket) -> Reply {
        resolve(self.client.as_ref(), ticket).await
    }
}

async fn resolve(client: &dyn QueryClient, ticket: DispatchTicket) -> Reply {
    let seq = ticket.seq();
    let content = match client.query(ticket.question()).await {
        Ok(content) => {
            debug!(seq, "dispatch succeeded");
            content
        }
        Err(e) => {
            warn!(seq, error = %e, "dispatch failed");
            Content::text(FALLBACK_REPLY)
        }
    };

    Reply { ticket, content }
}
