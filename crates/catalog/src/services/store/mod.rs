//! User-scoped persistence service.
//!
//! Durable CRUD over accounts and favorites with the uniqueness, idempotence
//! and cascade invariants enforced at the schema level. The service is cheap
//! to clone (pool handle + verifier Arc) and safe to call from any task;
//! every operation is independently transactional.

mod error;

pub use error::StoreError;

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;

use poke_explorer_core::{Email, ItemId, Username};

use crate::db::accounts::AccountRepository;
use crate::db::favorites::FavoriteRepository;
use crate::models::{Account, Favorite};
use crate::remote::CatalogItemDetail;
use crate::services::credentials::CredentialVerifier;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Durable, user-scoped store for accounts and favorites.
#[derive(Clone)]
pub struct UserScopedStore {
    pool: SqlitePool,
    verifier: Arc<dyn CredentialVerifier>,
}

impl UserScopedStore {
    /// Create a new store over a pool and a credential capability.
    #[must_use]
    pub fn new(pool: SqlitePool, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { pool, verifier }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidUsername` / `InvalidEmail` on malformed
    /// input, `WeakPassword` if the password is too short, and
    /// `AccountAlreadyExists` if the username is taken.
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, StoreError> {
        let username = Username::parse(username)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let digest = self.verifier.hash(password)?;

        let account = AccountRepository::new(&self.pool)
            .create(&username, &email, &digest, Utc::now())
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::Conflict(_) => StoreError::AccountAlreadyExists,
                other => StoreError::Repository(other),
            })?;

        tracing::info!(username = %account.username, "account created");
        Ok(account)
    }

    /// Authenticate by username and password.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccountNotFound` for an unknown username and
    /// `InvalidCredentials` for a wrong password - the two are deliberately
    /// distinct at this layer.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, StoreError> {
        let username = Username::parse(username)?;

        let (account, digest) = AccountRepository::new(&self.pool)
            .get_with_password_digest(&username)
            .await?
            .ok_or(StoreError::AccountNotFound)?;

        if !self.verifier.verify(password, &digest) {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Delete an account and, via cascade, all of its favorites.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccountNotFound` if the account does not exist.
    pub async fn delete_account(&self, account: &Account) -> Result<(), StoreError> {
        let deleted = AccountRepository::new(&self.pool).delete(account.id).await?;
        if !deleted {
            return Err(StoreError::AccountNotFound);
        }

        tracing::info!(username = %account.username, "account deleted");
        Ok(())
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Favorite a catalog item for an account.
    ///
    /// Persists a projection of the detail (id, name, artwork URL).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FavoriteAlreadyExists` if the account already
    /// favorited this item.
    pub async fn add_favorite(
        &self,
        detail: &CatalogItemDetail,
        owner: &Account,
    ) -> Result<(), StoreError> {
        FavoriteRepository::new(&self.pool)
            .create(
                owner.id,
                detail.id,
                &detail.name,
                detail.official_artwork_url.as_deref(),
                Utc::now(),
            )
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::Conflict(_) => StoreError::FavoriteAlreadyExists,
                other => StoreError::Repository(other),
            })?;

        Ok(())
    }

    /// Remove a favorite. A missing favorite is not an error - the operation
    /// is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the delete itself fails.
    pub async fn remove_favorite(&self, item_id: ItemId, owner: &Account) -> Result<(), StoreError> {
        let _removed = FavoriteRepository::new(&self.pool)
            .delete(owner.id, item_id)
            .await?;

        Ok(())
    }

    /// Check whether an account has favorited an item.
    ///
    /// Fails open: an internal lookup failure is logged and reads as `false`.
    /// This gates only a UI affordance, never a destructive action.
    pub async fn is_favorite(&self, item_id: ItemId, owner: &Account) -> bool {
        match FavoriteRepository::new(&self.pool)
            .exists(owner.id, item_id)
            .await
        {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(%item_id, error = %err, "favorite lookup failed, reporting false");
                false
            }
        }
    }

    /// Get all favorites of an account, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the query fails.
    pub async fn favorites_for(&self, owner: &Account) -> Result<Vec<Favorite>, StoreError> {
        let favorites = FavoriteRepository::new(&self.pool)
            .list_for_account(owner.id)
            .await?;

        Ok(favorites)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(StoreError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(StoreError::WeakPassword(_))
        ));
        assert!(validate_password("pikachu123").is_ok());
    }
}
