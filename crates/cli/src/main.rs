//! Mebel CLI - database maintenance for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema and session store migrations
//! mebel-cli migrate
//!
//! # Load the furniture catalog into an empty database
//! mebel-cli seed
//!
//! # Print the catalog
//! mebel-cli catalog
//!
//! # Create a customer account
//! mebel-cli user create -l anna -p secret1
//! ```
//!
//! All commands read `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`), loading
//! `.env` first if present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mebel-cli")]
#[command(author, version, about = "Mebel storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the product catalog (no-op if products already exist)
    Seed,
    /// List the product catalog
    Catalog,
    /// Manage customer accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new customer account
    Create {
        /// Login (3-30 chars: latin letters, digits, `_` or `-`)
        #[arg(short, long)]
        login: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Catalog => commands::catalog::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { login, password } => {
                commands::user::create(&login, &password).await?;
            }
        },
    }
    Ok(())
}
