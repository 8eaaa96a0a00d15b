//! # relay-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], message and user types,
//! presence signals, markup dialects, errors and tracing initialization. Transport-agnostic;
//! the teloxide implementation lives in relay-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{RelayError, Result};
pub use logger::{default_env_filter, init_tracing};
pub use types::{
    Chat, Handler, HandlerResponse, MarkupDialect, Message, PresenceSignal, ToCoreMessage,
    ToCoreUser, User,
};
