//! Relay settings: indicator cadence, outbound chunk size and reply parse mode.

use anyhow::{Context, Result};
use relay_core::MarkupDialect;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::format::MAX_MESSAGE_LEN;
use crate::orchestrator::OrchestratorSettings;

#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// PRESENCE_INTERVAL_MS
    pub presence_interval_ms: u64,
    /// MAX_MESSAGE_LEN
    pub max_message_len: usize,
    /// REPLY_PARSE_MODE
    pub reply_parse_mode: MarkupDialect,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            presence_interval_ms: 1000,
            max_message_len: MAX_MESSAGE_LEN,
            reply_parse_mode: MarkupDialect::MarkdownV2,
        }
    }
}

impl RelaySettings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            presence_interval_ms: parse_var("PRESENCE_INTERVAL_MS")?
                .unwrap_or(defaults.presence_interval_ms),
            max_message_len: parse_var("MAX_MESSAGE_LEN")?.unwrap_or(defaults.max_message_len),
            reply_parse_mode: match env::var("REPLY_PARSE_MODE") {
                Ok(raw) => raw
                    .parse::<MarkupDialect>()
                    .map_err(|e| anyhow::anyhow!("REPLY_PARSE_MODE: {}", e))?,
                Err(_) => defaults.reply_parse_mode,
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.presence_interval_ms == 0 {
            anyhow::bail!("PRESENCE_INTERVAL_MS must be greater than 0");
        }
        if self.max_message_len == 0 || self.max_message_len > MAX_MESSAGE_LEN {
            anyhow::bail!(
                "MAX_MESSAGE_LEN must be between 1 and {}, got {}",
                MAX_MESSAGE_LEN,
                self.max_message_len
            );
        }
        Ok(())
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            presence_interval: Duration::from_millis(self.presence_interval_ms),
            max_message_len: self.max_message_len,
            dialect: self.reply_parse_mode,
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        Err(_) => Ok(None),
    }
}
