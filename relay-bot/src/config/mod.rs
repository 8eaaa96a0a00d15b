//! Bot configuration: BaseConfig (Telegram + log + DB + allow-list) + RelaySettings (indicator
//! cadence, chunk size, parse mode) + the generation provider config.

mod base;
mod bot_config;
mod relay;


pub use base::{database_url_from_env, parse_allowed_users, BaseConfig, DEFAULT_DATABASE_URL};
pub use bot_config::BotConfig;
pub use relay::RelaySettings;
