//! devrewoh CLI - Database migrations and API key tools.
//!
//! # Usage
//!
//! ```bash
//! # Run site database migrations
//! devrewoh-cli migrate
//!
//! # Look up an issued API key
//! devrewoh-cli keys show --key ic_0123...
//! ```
//!
//! Both commands read `DATABASE_URL` (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "devrewoh-cli")]
#[command(author, version, about = "devrewoh site CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect issued API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
}

#[derive(Subcommand)]
enum KeysAction {
    /// Show the stored record for a raw API key
    Show {
        /// The raw key, as shown to the customer after checkout
        #[arg(short, long)]
        key: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Keys { action } => match action {
            KeysAction::Show { key } => commands::keys::show(&key).await?,
        },
    }
    Ok(())
}
