//! Chain handlers: request logging and command routing into the orchestrator.

mod logging;
mod relay_handler;

pub use logging::LoggingHandler;
pub use relay_handler::{start_greeting, RelayHandler, HELP_TEXT, MSG_IMAGE_USAGE};
