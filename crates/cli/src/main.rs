//! Poke Explorer CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! poke-explorer migrate
//!
//! # Create an account
//! poke-explorer signup -u ash -e ash@example.com -p pikachu123
//!
//! # Verify credentials
//! poke-explorer login -u ash -p pikachu123
//!
//! # List an account's favorites
//! poke-explorer favorites -u ash -p pikachu123
//!
//! # Page through the remote catalog
//! poke-explorer browse --pages 3
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `signup` - Create an account
//! - `login` - Verify credentials for an account
//! - `favorites` - List an account's favorites, newest first
//! - `browse` - Page through the remote catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "poke-explorer")]
#[command(author, version, about = "Poke Explorer CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create an account
    Signup {
        /// Username (3-32 characters, alphanumeric plus `-` and `_`)
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (minimum 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Verify credentials for an account
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List an account's favorites, newest first
    Favorites {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Page through the remote catalog
    Browse {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before the tracing filter reads RUST_LOG
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

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
        Commands::Signup {
            username,
            email,
            password,
        } => commands::account::signup(&username, &email, &password).await?,
        Commands::Login { username, password } => {
            commands::account::login(&username, &password).await?;
        }
        Commands::Favorites { username, password } => {
            commands::account::favorites(&username, &password).await?;
        }
        Commands::Browse { pages } => commands::browse::run(pages).await?,
    }
    Ok(())
}
