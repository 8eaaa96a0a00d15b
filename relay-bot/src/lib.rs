//! # Relay bot
//!
//! Relays Telegram messages to a generation provider (OpenAI chat and image APIs). Per request
//! the [`Orchestrator`] checks the allow-list ([`AuthorizationGate`]), keeps a presence signal
//! alive ([`LivenessIndicator`]) while the [`Executor`] runs the provider call, then escapes,
//! chunks and delivers the result.

pub mod chain;
pub mod cli;
pub mod command;
pub mod config;
pub mod executor;
pub mod format;
pub mod gate;
pub mod handlers;
pub mod indicator;
pub mod orchestrator;
pub mod runner;
pub mod telegram;

pub use cli::{handle_admin, load_config, run_admin, Cli, Commands};

pub use relay_core::{
    Bot, Chat, Handler, HandlerResponse, MarkupDialect, Message, PresenceSignal,
    RelayError, Result, User,
};

pub use chain::HandlerChain;
pub use command::{parse_command, Command};
pub use config::{BotConfig, RelaySettings};
pub use executor::{Executor, OperationOutcome};
pub use format::{chunk, escape, MAX_MESSAGE_LEN};
pub use gate::{AuthorizationGate, GateError, StaticAllowList};
pub use handlers::{LoggingHandler, RelayHandler};
pub use indicator::{IndicatorHandle, LivenessIndicator};
pub use orchestrator::{Orchestrator, OrchestratorSettings, SessionState};
pub use runner::{build_allow_list, build_handler_chain, run_bot};
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
