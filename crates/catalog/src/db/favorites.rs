//! Favorite repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use poke_explorer_core::{AccountId, FavoriteId, ItemId};

use super::RepositoryError;
use crate::models::Favorite;

/// Repository for favorite database operations.
///
/// The `(account_id, item_id)` UNIQUE constraint makes the uniqueness check
/// atomic: of two concurrent inserts for the same pair, exactly one observes
/// a conflict.
pub struct FavoriteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new favorite for an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the account already favorited
    /// this item. Returns `RepositoryError::Database` for other database
    /// errors, including foreign-key failures for unknown accounts.
    pub async fn create(
        &self,
        account_id: AccountId,
        item_id: ItemId,
        display_name: &str,
        image_ref: Option<&str>,
        favorited_at: DateTime<Utc>,
    ) -> Result<Favorite, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO favorite (account_id, item_id, display_name, image_ref, favorited_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            ",
        )
        .bind(account_id)
        .bind(item_id)
        .bind(display_name)
        .bind(image_ref)
        .bind(favorited_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("favorite already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Favorite {
            id: FavoriteId::new(id),
            account_id,
            item_id,
            display_name: display_name.to_owned(),
            image_ref: image_ref.map(str::to_owned),
            favorited_at,
        })
    }

    /// Delete a favorite by `(account, item)` pair.
    ///
    /// # Returns
    ///
    /// Returns `true` if the favorite was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(
        &self,
        account_id: AccountId,
        item_id: ItemId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM favorite
            WHERE account_id = ?1 AND item_id = ?2
            ",
        )
        .bind(account_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether an account has favorited an item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        account_id: AccountId,
        item_id: ItemId,
    ) -> Result<bool, RepositoryError> {
        let found = sqlx::query_scalar::<_, i64>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM favorite
                WHERE account_id = ?1 AND item_id = ?2
            )
            ",
        )
        .bind(account_id)
        .bind(item_id)
        .fetch_one(self.pool)
        .await?;

        Ok(found != 0)
    }

    /// Get all favorites of an account, most recent first.
    ///
    /// Ties on `favorited_at` fall back to insertion order (descending id).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Favorite>, RepositoryError> {
        let rows = sqlx::query_as::<_, Favorite>(
            r"
            SELECT id, account_id, item_id, display_name, image_ref, favorited_at
            FROM favorite
            WHERE account_id = ?1
            ORDER BY favorited_at DESC, id DESC
            ",
        )
        .bind(account_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Count all favorites in the store, across every account.
    ///
    /// Used by maintenance tooling and the cascade tests.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorite")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
