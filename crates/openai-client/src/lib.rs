//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for chat completion and DALL-E image generation.
//! Provides token masking for safe logging and a simple request/response API.
//!
//! Both calls return `Ok(None)` when the API answered but carried nothing usable
//! (no choices, no content, no image data), so callers can tell an empty answer from an error.

use async_openai::{
    config::OpenAIConfig,
    types::{
        CreateChatCompletionRequestArgs, CreateImageRequestArgs, Image, ImageModel,
        ImageResponseFormat, ImageSize,
    },
    Client,
};
use std::sync::Arc;
use tracing;

pub use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// If the key has 11 chars or fewer, returns "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// OpenAI client. Wraps the async-openai client and keeps the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    /// API key stored only for logging (masked).
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key_for_logging)
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// `Ok(None)` when the response has no choices or the first choice has no content.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<Option<String>> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }

    /// Generates one image and returns it base64-encoded.
    ///
    /// `Ok(None)` when the response carries no image data.
    pub async fn generate_image_b64(
        &self,
        model: &str,
        prompt: &str,
        size: ImageSize,
    ) -> anyhow::Result<Option<String>> {
        tracing::info!(
            model = %model,
            size = ?size,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %self.masked_key(),
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(ImageModel::Other(model.to_string()))
            .size(size)
            .response_format(ImageResponseFormat::B64Json)
            .n(1)
            .build()?;

        let response = self.client.images().create(request).await?;

        let encoded = response.data.iter().find_map(|image| match image.as_ref() {
            Image::B64Json { b64_json, .. } => Some(b64_json.as_ref().clone()),
            Image::Url { .. } => None,
        });

        tracing::info!(
            image_count = response.data.len(),
            has_b64 = encoded.is_some(),
            "OpenAI image generation completed"
        );

        Ok(encoded)
    }
}

/// Parses a `WIDTHxHEIGHT` size string into an [`ImageSize`].
pub fn parse_image_size(size: &str) -> Option<ImageSize> {
    match size.trim() {
        "256x256" => Some(ImageSize::S256x256),
        "512x512" => Some(ImageSize::S512x512),
        "1024x1024" => Some(ImageSize::S1024x1024),
        "1792x1024" => Some(ImageSize::S1792x1024),
        "1024x1792" => Some(ImageSize::S1024x1792),
        _ => None,
    }
}
