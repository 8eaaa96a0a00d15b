//! OpenAI implementation of [`GenerationProvider`]: chat completion for text, DALL-E for images.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, OpenAIClient,
};
use tracing::{debug, instrument};

use super::config::{GenerationConfig, DEFAULT_SYSTEM_PROMPT};
use super::{GenerationProvider, OperationKind, OperationRequest, Payload};

/// Provider backed by openai-client. Cheap to clone; shares the HTTP client.
#[derive(Clone)]
pub struct OpenAIGenerationProvider {
    client: OpenAIClient,
    text_model: String,
    image_model: String,
    system_prompt: String,
    image_size: String,
}

impl OpenAIGenerationProvider {
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            text_model: "gpt-3.5-turbo".to_string(),
            image_model: "dall-e-3".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            image_size: "1024x1024".to_string(),
        }
    }

    /// Builds the client and models from a [`GenerationConfig`].
    pub fn from_config(config: &dyn GenerationConfig) -> Self {
        let client = OpenAIClient::with_base_url(
            config.api_key().to_string(),
            config.base_url().to_string(),
        );
        Self::new(client)
            .with_text_model(config.text_model())
            .with_image_model(config.image_model())
            .with_system_prompt(config.system_prompt())
            .with_image_size(config.image_size())
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_image_size(mut self, size: impl Into<String>) -> Self {
        self.image_size = size.into();
        self
    }

    fn chat_messages(&self, prompt: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()?
                .into(),
        ])
    }

    async fn generate_text(&self, prompt: &str) -> Result<Option<Payload>> {
        let messages = self.chat_messages(prompt)?;
        let reply = self.client.chat_completion(&self.text_model, messages).await?;
        Ok(reply.map(Payload::Text))
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<Payload>> {
        let size = openai_client::parse_image_size(&self.image_size)
            .with_context(|| format!("Unsupported image size: {}", self.image_size))?;
        let encoded = self
            .client
            .generate_image_b64(&self.image_model, prompt, size)
            .await?;
        match encoded {
            Some(b64) => {
                let bytes = decode_image(&b64)?;
                debug!(bytes = bytes.len(), "Decoded generated image");
                Ok(Some(Payload::Image(bytes)))
            }
            None => Ok(None),
        }
    }
}

/// Decodes a base64 image body; whitespace (line-wrapped payloads) is ignored.
pub(crate) fn decode_image(b64: &str) -> Result<Vec<u8>> {
    let compact: String = b64.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .context("Image payload is not valid base64")
}

#[async_trait]
impl GenerationProvider for OpenAIGenerationProvider {
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    async fn generate(&self, request: &OperationRequest) -> Result<Option<Payload>> {
        match request.kind {
            OperationKind::Text => self.generate_text(&request.prompt).await,
            OperationKind::Image => self.generate_image(&request.prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image_valid() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello".to_vec());
        assert_eq!(decode_image("aGVs\nbG8=").unwrap(), b"hello".to_vec());
    }

    #[test]
    fn test_decode_image_invalid() {
        assert!(decode_image("not base64 !!").is_err());
    }

    #[test]
    fn test_chat_messages_prepend_system_prompt() {
        let provider = OpenAIGenerationProvider::new(OpenAIClient::new("test".to_string()))
            .with_system_prompt("Be brief.");
        let messages = provider.chat_messages("hello").unwrap();
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[tokio::test]
    async fn test_unsupported_image_size_is_an_error() {
        let provider = OpenAIGenerationProvider::new(OpenAIClient::new("test".to_string()))
            .with_image_size("3x3");
        let result = provider.generate(&OperationRequest::image("a cat")).await;
        assert!(result.is_err());
    }
}
