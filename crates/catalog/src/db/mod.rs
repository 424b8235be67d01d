//! Database operations for the local SQLite store.
//!
//! Stores local data only (the remote catalog is the source of truth for
//! items):
//!
//! ## Tables
//!
//! - `account` - Registered users with hashed credentials
//! - `favorite` - Per-user catalog bookmarks, unique per (account, item)
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/catalog/migrations/` and run via:
//! ```bash
//! cargo run -p poke-explorer-cli -- migrate
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod accounts;
pub mod favorites;

pub use accounts::AccountRepository;
pub use favorites::FavoriteRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// A stored value failed validation on the way out.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// Foreign keys are enabled on every connection - the favorite cascade
/// depends on it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the database cannot be
/// opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
