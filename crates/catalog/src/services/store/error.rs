//! Store error types.

use thiserror::Error;

use poke_explorer_core::{EmailError, UsernameError};

use crate::db::RepositoryError;
use crate::services::credentials::CredentialError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Username already registered.
    #[error("this username is already taken")]
    AccountAlreadyExists,

    /// No account with the given username.
    #[error("account not found")]
    AccountNotFound,

    /// Wrong password for an existing account.
    #[error("incorrect password")]
    InvalidCredentials,

    /// Item already favorited by this account.
    #[error("this item is already in your favorites")]
    FavoriteAlreadyExists,

    /// Credential hashing error.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
