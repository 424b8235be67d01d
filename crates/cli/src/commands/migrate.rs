//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! poke-explorer migrate
//! ```
//!
//! # Environment Variables
//!
//! - `POKE_DATABASE_URL` - `SQLite` connection string (defaults to
//!   `sqlite://poke_explorer.db`)

use poke_explorer_catalog::{ExplorerConfig, db};

/// Run database migrations against the configured database.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ExplorerConfig::from_env()?;

    tracing::info!(database_url = %config.database_url, "Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
