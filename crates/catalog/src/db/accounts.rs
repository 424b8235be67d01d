//! Account repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use poke_explorer_core::{AccountId, Email, Username};

use super::RepositoryError;
use crate::models::Account;

/// Raw account row before validated construction.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    registered_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, RepositoryError> {
        let username = Username::parse(&self.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Account {
            id: AccountId::new(self.id),
            username,
            email,
            registered_at: self.registered_at,
        })
    }
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account with an already-hashed credential.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        email: &Email,
        password_digest: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<Account, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO account (username, email, password_digest, registered_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            ",
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(password_digest)
        .bind(registered_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Account {
            id: AccountId::new(id),
            username: username.clone(),
            email: email.clone(),
            registered_at,
        })
    }

    /// Get an account by its exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT id, username, email, registered_at
            FROM account
            WHERE username = ?1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    /// Get an account together with its password digest.
    ///
    /// Returns `None` if no account has that username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get_with_password_digest(
        &self,
        username: &Username,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct DigestRow {
            id: i64,
            username: String,
            email: String,
            registered_at: DateTime<Utc>,
            password_digest: String,
        }

        let row = sqlx::query_as::<_, DigestRow>(
            r"
            SELECT id, username, email, registered_at, password_digest
            FROM account
            WHERE username = ?1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let digest = r.password_digest;
        let account = AccountRow {
            id: r.id,
            username: r.username,
            email: r.email,
            registered_at: r.registered_at,
        }
        .into_account()?;

        Ok(Some((account, digest)))
    }

    /// Delete an account by ID.
    ///
    /// Favorites owned by the account are removed by the schema-level
    /// cascade.
    ///
    /// # Returns
    ///
    /// Returns `true` if the account was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AccountId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM account
            WHERE id = ?1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
