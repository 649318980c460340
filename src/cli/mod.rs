use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod agent;
pub mod key;
pub mod page;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Decode a base64url VAPID public key and print its bytes
    DecodeKey {
        #[arg(long)]
        key: String,
    },
    /// Show whether reminders are enabled
    Status {
        /// JSON page data with the server's endpoint addresses
        #[arg(long)]
        page_data: Option<PathBuf>,
    },
    /// Enable or disable reminder notifications
    Toggle {
        #[arg(long)]
        page_data: Option<PathBuf>,
    },
    /// Snooze reminders for the current subscription
    Snooze {
        #[arg(long)]
        page_data: Option<PathBuf>,
    },
    /// Deliver a push message to the background agent
    Push {
        /// Raw JSON push payload
        #[arg(long)]
        payload: Option<String>,
    },
    /// Click a delivered reminder, optionally on one of its actions
    Click {
        #[arg(long)]
        action: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::DecodeKey { key }) => {
            key::run(&key)?;
        }
        Some(Command::Status { page_data }) => {
            page::status(&config, page_data).await?;
        }
        Some(Command::Toggle { page_data }) => {
            page::toggle(&config, page_data).await?;
        }
        Some(Command::Snooze { page_data }) => {
            page::snooze(&config, page_data).await?;
        }
        Some(Command::Push { payload }) => {
            agent::push(&config, payload).await?;
        }
        Some(Command::Click { action }) => {
            agent::click(&config, action).await?;
        }
        None => {}
    }

    Ok(())
}
