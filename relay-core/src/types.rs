//! Core types: user, chat, message, presence signal, markup dialect, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requester identity (numeric id plus display handle parts). Immutable per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// First and last name joined by a space; falls back to `@username`, then to the numeric id.
    pub fn display_name(&self) -> String {
        let name = [
            self.first_name.as_deref().unwrap_or("").trim(),
            self.last_name.as_deref().unwrap_or("").trim(),
        ]
        .join(" ")
        .trim()
        .to_string();
        if !name.is_empty() {
            return name;
        }
        match self.username.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => format!("@{}", u),
            _ => self.id.to_string(),
        }
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound message with user, chat and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport-specific id; replies reference it for correlation.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
}

/// Transport-level "work in progress" indicator. Expires after a few seconds on the client,
/// so it has to be re-emitted while an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresenceSignal {
    Typing,
    UploadPhoto,
}

impl PresenceSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceSignal::Typing => "typing",
            PresenceSignal::UploadPhoto => "upload_photo",
        }
    }
}

impl fmt::Display for PresenceSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering dialect of an outbound text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkupDialect {
    /// No parse mode; text is shown verbatim.
    Plain,
    /// Legacy Telegram Markdown.
    Markdown,
    #[default]
    MarkdownV2,
    Html,
}

impl MarkupDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupDialect::Plain => "plain",
            MarkupDialect::Markdown => "markdown",
            MarkupDialect::MarkdownV2 => "markdown_v2",
            MarkupDialect::Html => "html",
        }
    }
}

impl fmt::Display for MarkupDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkupDialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "none" | "" => Ok(MarkupDialect::Plain),
            "markdown" => Ok(MarkupDialect::Markdown),
            "markdown_v2" | "markdownv2" => Ok(MarkupDialect::MarkdownV2),
            "html" => Ok(MarkupDialect::Html),
            other => Err(format!("unknown markup dialect: {}", other)),
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
