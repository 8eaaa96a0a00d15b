//! relay-bot binary: run the bot or administer the allow-list.

use anyhow::Result;
use clap::Parser;
use relay_bot::{handle_admin, load_config, run_bot, Cli, Commands};
use relay_core::default_env_filter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        command => {
            tracing_subscriber::fmt()
                .with_env_filter(default_env_filter())
                .with_target(false)
                .init();
            handle_admin(command).await
        }
    }
}
