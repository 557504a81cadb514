// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging bridge core: session location, one-time login, and incremental
//! per-peer delivery over a shared [`MessagingClient`].
//!
//! The HTTP surface lives in `relay-gateway`; this crate is transport-free.

pub mod auth;
pub mod cursor;
pub mod prompt;
pub mod session;

use std::sync::Arc;

use relay_core::{MessageView, MessagingClient, RelayError};
use tracing::{debug, info};

pub use auth::{Authenticator, LoginSecrets};
pub use cursor::CursorTable;
pub use prompt::ConsolePrompt;
pub use session::{AccountCredentials, SessionStore};

/// Raw items fetched per poll when the caller gives no limit.
pub const DEFAULT_POLL_LIMIT: u32 = 20;

/// Poll and send operations over one messaging account.
///
/// Cheap to share behind an `Arc`; all state is the cursor table.
pub struct Bridge {
    client: Arc<dyn MessagingClient>,
    cursors: CursorTable,
    default_limit: u32,
}

impl Bridge {
    pub fn new(client: Arc<dyn MessagingClient>) -> Self {
        Self {
            client,
            cursors: CursorTable::new(),
            default_limit: DEFAULT_POLL_LIMIT,
        }
    }

    /// Override the limit used when a poll omits one.
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub fn cursors(&self) -> &CursorTable {
        &self.cursors
    }

    /// Return inbound messages of `peer` not delivered before, oldest first.
    ///
    /// Fetches the `limit` most recent messages, drops outgoing ones, and keeps
    /// those above `after_id` (or above the stored cursor when `after_id` is
    /// `None`). The cursor then advances to the newest kept id.
    pub async fn poll(
        &self,
        peer: &str,
        limit: Option<u32>,
        after_id: Option<i64>,
    ) -> Result<Vec<MessageView>, RelayError> {
        if peer.trim().is_empty() {
            return Err(RelayError::InvalidInput {
                code: "peer_required",
            });
        }
        let limit = match limit {
            Some(0) => {
                return Err(RelayError::InvalidInput {
                    code: "invalid_limit",
                })
            }
            Some(n) => n,
            None => self.default_limit,
        };

        let entity = self.client.resolve_peer(peer).await?;
        let mut history = self.client.recent_messages(&entity, limit).await?;
        history.reverse();
        history.retain(|m| !m.outgoing);

        let fetched = history.len();
        let kept = self.cursors.deliver(peer, after_id, history);
        debug!(peer, limit, fetched, delivered = kept.len(), "poll");

        Ok(kept.into_iter().map(MessageView::from).collect())
    }

    /// Send `text` to `peer` and return the created message.
    ///
    /// Does not touch the delivery cursor.
    pub async fn send(&self, peer: &str, text: &str) -> Result<MessageView, RelayError> {
        if peer.trim().is_empty() || text.is_empty() {
            return Err(RelayError::InvalidInput {
                code: "peer_text_required",
            });
        }

        let entity = self.client.resolve_peer(peer).await?;
        let sent = self.client.send_message(&entity, text).await?;
        info!(peer, id = sent.id, "message sent");
        Ok(MessageView::from(sent))
    }
}
