//! Terminal handler: answers `/start` and `/help` directly and hands text and `/image`
//! requests to the [`Orchestrator`].

use std::sync::Arc;

use async_trait::async_trait;
use generation_client::OperationRequest;
use relay_core::{Bot, Handler, HandlerResponse, MarkupDialect, Message, Result, User};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::command::{parse_command, Command};
use crate::format::escape;
use crate::orchestrator::Orchestrator;

pub const HELP_TEXT: &str = "Send me a message and I will answer it.\n\
/image <description> - generate an image\n\
/help - show this message";

pub const MSG_IMAGE_USAGE: &str =
    "Please provide a description for the image after the /image command.";

/// `Shalom <mention>!` as HTML, the mention linking to the user's profile.
pub fn start_greeting(user: &User) -> String {
    format!(
        "Shalom <a href=\"tg://user?id={}\">{}</a>!",
        user.id,
        escape(&user.display_name(), MarkupDialect::Html)
    )
}

pub struct RelayHandler {
    bot: Arc<dyn Bot>,
    orchestrator: Arc<Orchestrator>,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl RelayHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        orchestrator: Arc<Orchestrator>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            orchestrator,
            bot_username,
        }
    }

    async fn reply(
        &self,
        message: &Message,
        text: String,
        dialect: MarkupDialect,
    ) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text, dialect).await?;
        Ok(HandlerResponse::Reply(text))
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, message_id = %message.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.message_type != "text" {
            debug!(message_type = %message.message_type, "Ignoring non-text message");
            return Ok(HandlerResponse::Ignore);
        }

        let username = self.bot_username.read().await.clone();
        let request = match parse_command(&message.content, username.as_deref()) {
            Command::Start => {
                return self
                    .reply(message, start_greeting(&message.user), MarkupDialect::Html)
                    .await
            }
            Command::Help => {
                return self
                    .reply(message, HELP_TEXT.to_string(), MarkupDialect::Plain)
                    .await
            }
            Command::Image(None) => {
                return self
                    .reply(message, MSG_IMAGE_USAGE.to_string(), MarkupDialect::Plain)
                    .await
            }
            Command::Image(Some(description)) => OperationRequest::image(description),
            Command::Text(text) => OperationRequest::text(text),
            Command::Ignore => {
                debug!("Ignoring command");
                return Ok(HandlerResponse::Ignore);
            }
        };

        let state = self.orchestrator.run(message, request).await;
        info!(state = %state, "Request handled");
        Ok(HandlerResponse::Stop)
    }
}
