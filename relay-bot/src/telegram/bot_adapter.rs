//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code talks to Telegram;
//! tests substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{
    parse_message_id, Bot as CoreBot, Chat, MarkupDialect, Message, PresenceSignal, RelayError,
    Result,
};
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, InputFile, MessageId, ParseMode, ReplyParameters};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[allow(deprecated)]
fn parse_mode(dialect: MarkupDialect) -> Option<ParseMode> {
    match dialect {
        MarkupDialect::Plain => None,
        MarkupDialect::Markdown => Some(ParseMode::Markdown),
        MarkupDialect::MarkdownV2 => Some(ParseMode::MarkdownV2),
        MarkupDialect::Html => Some(ParseMode::Html),
    }
}

fn chat_action(signal: PresenceSignal) -> ChatAction {
    match signal {
        PresenceSignal::Typing => ChatAction::Typing,
        PresenceSignal::UploadPhoto => ChatAction::UploadPhoto,
    }
}

fn reply_parameters(message: &Message) -> Result<ReplyParameters> {
    let id = parse_message_id(&message.id)?;
    Ok(ReplyParameters::new(MessageId(id)))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn reply_to(&self, message: &Message, text: &str, dialect: MarkupDialect) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(reply_parameters(message)?);
        if let Some(mode) = parse_mode(dialect) {
            request = request.parse_mode(mode);
        }
        request
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_photo(&self, message: &Message, photo: Vec<u8>) -> Result<()> {
        self.bot
            .send_photo(
                ChatId(message.chat.id),
                InputFile::memory(photo).file_name("image.png"),
            )
            .reply_parameters(reply_parameters(message)?)
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_chat_action(&self, chat: &Chat, signal: PresenceSignal) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), chat_action(signal))
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_mapping() {
        assert_eq!(parse_mode(MarkupDialect::Plain), None);
        assert_eq!(parse_mode(MarkupDialect::MarkdownV2), Some(ParseMode::MarkdownV2));
        assert_eq!(parse_mode(MarkupDialect::Html), Some(ParseMode::Html));
    }

    #[test]
    fn test_chat_action_mapping() {
        assert_eq!(chat_action(PresenceSignal::Typing), ChatAction::Typing);
        assert_eq!(chat_action(PresenceSignal::UploadPhoto), ChatAction::UploadPhoto);
    }
}
