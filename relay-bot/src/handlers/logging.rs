//! Logs each inbound message before the chain runs and the final response after it.

use async_trait::async_trait;
use relay_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_type = %message.message_type,
            content_len = message.content.chars().count(),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use relay_core::{Chat, User};

    fn sample_message() -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 7,
                username: Some("ada".to_string()),
                first_name: Some("Ada".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 7,
                chat_type: "private".to_string(),
            },
            content: "hello".to_string(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
            reply_to_message_id: None,
        }
    }

    #[tokio::test]
    async fn test_logging_handler_before_continues() {
        assert!(LoggingHandler.before(&sample_message()).await.unwrap());
    }

    #[tokio::test]
    async fn test_logging_handler_after_ok() {
        let response = HandlerResponse::Reply("hi".to_string());
        assert!(LoggingHandler.after(&sample_message(), &response).await.is_ok());
    }
}
