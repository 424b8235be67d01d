//! Unified error handling.
//!
//! Provides a unified `ExplorerError` for callers (the CLI) that cross
//! layer boundaries; the layers themselves keep their own typed errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::remote::RemoteError;
use crate::services::store::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Remote catalog operation failed.
    #[error("remote catalog error: {0}")]
    Remote(#[from] RemoteError),

    /// Repository operation failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Result type alias for `ExplorerError`.
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_surface_verbatim() {
        let err = ExplorerError::from(StoreError::FavoriteAlreadyExists);
        assert_eq!(err.to_string(), "this item is already in your favorites");
    }

    #[test]
    fn remote_errors_are_wrapped() {
        let err = ExplorerError::from(RemoteError::NotFound("x".to_owned()));
        assert!(err.to_string().starts_with("remote catalog error"));
    }
}
