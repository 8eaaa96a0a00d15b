//! CLI parser and the administrative commands over the allow-list database.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storage::{AccessRepository, AllowOutcome, BalanceOutcome, RevokeOutcome, UserSummary};

use crate::config::{database_url_from_env, BotConfig};

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Telegram relay to OpenAI text and image generation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Add a user to the allow-list.
    Allow { user_id: i64 },
    /// Remove a user from the allow-list.
    Disable { user_id: i64 },
    /// Set the balance of an allow-listed user.
    SetBalance {
        user_id: i64,
        #[arg(allow_negative_numbers = true)]
        balance: f64,
    },
    /// List allow-listed users with balance and images generated.
    ListUsers,
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

async fn open_repository() -> Result<AccessRepository> {
    let database_url = database_url_from_env();
    AccessRepository::new(&database_url)
        .await
        .with_context(|| format!("Open allow-list database {}", database_url))
}

/// Runs one administrative command and returns the line to print.
pub async fn run_admin(command: &Commands, repo: &AccessRepository) -> Result<String> {
    let line = match command {
        Commands::Allow { user_id } => match repo.allow_user(*user_id).await? {
            AllowOutcome::Allowed => format!("User {} allowed.", user_id),
            AllowOutcome::AlreadyAllowed => format!("User {} is already allowed.", user_id),
        },
        Commands::Disable { user_id } => match repo.disable_user(*user_id).await? {
            RevokeOutcome::Revoked => format!("User {} disabled.", user_id),
            RevokeOutcome::NotAllowed => format!("User {} is not allowed.", user_id),
        },
        Commands::SetBalance { user_id, balance } => {
            match repo.set_balance(*user_id, *balance).await? {
                BalanceOutcome::Updated => format!("Balance of user {} set to {}.", user_id, balance),
                BalanceOutcome::NotAllowed => {
                    format!("User {} is not allowed; balance not set.", user_id)
                }
            }
        }
        Commands::ListUsers => format_users(&repo.list_users().await?),
        Commands::Run { .. } => anyhow::bail!("run is not an administrative command"),
    };
    Ok(line)
}

/// Opens DATABASE_URL and runs an administrative command against it.
pub async fn handle_admin(command: Commands) -> Result<()> {
    let repo = open_repository().await?;
    println!("{}", run_admin(&command, &repo).await?);
    Ok(())
}

fn format_users(users: &[UserSummary]) -> String {
    if users.is_empty() {
        return "No allowed users.".to_string();
    }
    let mut out = format!("{:<16} {:>12} {:>16}", "user_id", "balance", "images_generated");
    for u in users {
        let balance = u
            .balance
            .map(|b| format!("{:.2}", b))
            .unwrap_or_else(|| "-".to_string());
        let images = u
            .images_generated
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("\n{:<16} {:>12} {:>16}", u.user_id, balance, images));
    }
    out
}
