//! Generation provider configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Default system message for text operations.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Provider configuration interface for OpenAI-compatible APIs.
pub trait GenerationConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn text_model(&self) -> &str;
    fn image_model(&self) -> &str;
    fn system_prompt(&self) -> &str;
    fn image_size(&self) -> &str;
}

/// Provider config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvGenerationConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub gpt_model: String,
    pub dall_e_model: String,
    pub system_prompt: String,
    pub image_size: String,
}

impl GenerationConfig for EnvGenerationConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn text_model(&self) -> &str {
        &self.gpt_model
    }
    fn image_model(&self) -> &str {
        &self.dall_e_model
    }
    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
    fn image_size(&self) -> &str {
        &self.image_size
    }
}

impl EnvGenerationConfig {
    /// Load from environment variables. Only `OPENAI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let gpt_model = env::var("GPT_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let dall_e_model = env::var("DALL_E_MODEL").unwrap_or_else(|_| "dall-e-3".to_string());
        let system_prompt = env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        let image_size = env::var("IMAGE_SIZE").unwrap_or_else(|_| "1024x1024".to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            gpt_model,
            dall_e_model,
            system_prompt,
            image_size,
        })
    }

    /// Fails when `image_size` is not one the image API accepts.
    pub fn validate(&self) -> Result<()> {
        if openai_client::parse_image_size(&self.image_size).is_none() {
            anyhow::bail!("IMAGE_SIZE is not a supported size: {}", self.image_size);
        }
        Ok(())
    }
}
