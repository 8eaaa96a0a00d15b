//! BotConfig: BaseConfig + RelaySettings + provider config. Use load() for env-based loading.

use anyhow::Result;
use generation_client::EnvGenerationConfig;

use super::{BaseConfig, RelaySettings};

/// Bot config. Use BotConfig::load() for env-based loading, then validate().
pub struct BotConfig {
    pub base: BaseConfig,
    pub relay: RelaySettings,
    pub generation: EnvGenerationConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let relay = RelaySettings::from_env()?;
        let generation = EnvGenerationConfig::from_env()?;
        Ok(Self {
            base,
            relay,
            generation,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.relay.validate()?;
        self.generation.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn relay(&self) -> &RelaySettings {
        &self.relay
    }
    pub fn generation(&self) -> &EnvGenerationConfig {
        &self.generation
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn allowed_users(&self) -> Option<&[i64]> {
        self.base.allowed_users.as_deref()
    }
}
