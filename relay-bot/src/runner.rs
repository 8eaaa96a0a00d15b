//! Wiring: config → allow-list store, provider, orchestrator, handler chain → REPL.

use std::sync::Arc;

use anyhow::{Context, Result};
use generation_client::{GenerationConfig, GenerationProvider, OpenAIGenerationProvider};
use relay_core::{init_tracing, Bot};
use storage::{AccessRepository, AllowListStore};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::executor::Executor;
use crate::gate::{AuthorizationGate, StaticAllowList};
use crate::handlers::{LoggingHandler, RelayHandler};
use crate::orchestrator::{Orchestrator, OrchestratorSettings};
use crate::telegram::{run_repl, TelegramBotAdapter};

/// Static list when `ALLOWED_USERS` is set, otherwise the SQLite allow-list.
pub async fn build_allow_list(config: &BotConfig) -> Result<Arc<dyn AllowListStore>> {
    if let Some(ids) = config.allowed_users() {
        info!(count = ids.len(), "Using static allow-list from ALLOWED_USERS");
        return Ok(Arc::new(StaticAllowList::new(ids.iter().copied())));
    }

    let repo = AccessRepository::new(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to initialize allow-list storage"
            );
            anyhow::anyhow!("Failed to initialize allow-list storage: {}", e)
        })?;
    Ok(Arc::new(repo))
}

/// LoggingHandler → RelayHandler, with the orchestrator built from the given collaborators.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    provider: Arc<dyn GenerationProvider>,
    allow_list: Arc<dyn AllowListStore>,
    settings: OrchestratorSettings,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::clone(&bot),
        AuthorizationGate::new(allow_list),
        Executor::new(provider),
        settings,
    ));
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(RelayHandler::new(bot, orchestrator, bot_username)))
}

fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Main entry: validate config, init logging, build components, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let generation = config.generation();
    info!(
        database_url = %config.database_url(),
        text_model = %generation.text_model(),
        image_model = %generation.image_model(),
        api_key = %openai_client::mask_token(generation.api_key()),
        parse_mode = %config.relay().reply_parse_mode,
        "Initializing bot"
    );

    let allow_list = build_allow_list(&config).await?;
    let provider: Arc<dyn GenerationProvider> =
        Arc::new(OpenAIGenerationProvider::from_config(generation));

    let teloxide_bot = build_teloxide_bot(&config)?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot_username = Arc::new(RwLock::new(None));

    let handler_chain = build_handler_chain(
        bot,
        provider,
        allow_list,
        config.relay().orchestrator_settings(),
        bot_username.clone(),
    );

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain, bot_username).await
}
