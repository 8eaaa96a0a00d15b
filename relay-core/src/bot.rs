//! Bot abstraction for sending replies, photos and presence signals.
//!
//! [`Bot`] is transport-agnostic; relay-bot's `TelegramBotAdapter` implements it via teloxide,
//! tests substitute recording implementations.

use crate::error::{RelayError, Result};
use crate::types::{Chat, MarkupDialect, Message, PresenceSignal};
use async_trait::async_trait;

/// Outbound transport primitives consumed by the orchestrator and handlers.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `text` as a reply to `message` (same chat), rendered with `dialect`.
    async fn reply_to(&self, message: &Message, text: &str, dialect: MarkupDialect) -> Result<()>;
    /// Sends raw image bytes as a photo replying to `message`.
    async fn reply_photo(&self, message: &Message, photo: Vec<u8>) -> Result<()>;
    /// Emits a presence signal (typing, uploading) to the chat. Expires on the client after a few seconds.
    async fn send_chat_action(&self, chat: &Chat, signal: PresenceSignal) -> Result<()>;
}

/// Parses a transport message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| RelayError::InvalidMessageId(s.to_string()))
}
