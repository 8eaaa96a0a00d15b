//! # Generation client
//!
//! Defines the remote generation provider seam: [`OperationRequest`] in, an optional
//! [`Payload`] out. [`GenerationProvider`] is the async form used by the executor;
//! [`BlockingGenerationProvider`] is for synchronous SDKs and is adapted onto tokio's blocking
//! pool by [`Blocking`]. [`OpenAIGenerationProvider`] talks to OpenAI chat and image APIs.
//!
//! `Ok(None)` means the provider answered but had nothing usable; `Err` means the call failed.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

mod blocking;
mod config;
mod openai_provider;

pub use blocking::{Blocking, BlockingGenerationProvider};
pub use config::{EnvGenerationConfig, GenerationConfig, DEFAULT_SYSTEM_PROMPT};
pub use openai_provider::OpenAIGenerationProvider;

/// What the remote operation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Text,
    Image,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Text => f.write_str("text"),
            OperationKind::Image => f.write_str("image"),
        }
    }
}

/// Everything needed to invoke the provider once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub kind: OperationKind,
    pub prompt: String,
}

impl OperationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Text,
            prompt: prompt.into(),
        }
    }

    pub fn image(prompt: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Image,
            prompt: prompt.into(),
        }
    }
}

/// Provider output: generated text or raw image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Image(Vec<u8>),
}

impl Payload {
    /// True for whitespace-only text and zero-length images.
    pub fn is_blank(&self) -> bool {
        match self {
            Payload::Text(text) => text.trim().is_empty(),
            Payload::Image(bytes) => bytes.is_empty(),
        }
    }
}

/// Async remote generation provider. Implementations may be slow and fail.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, request: &OperationRequest) -> Result<Option<Payload>>;
}
