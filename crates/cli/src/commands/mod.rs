//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod migrate;

use std::sync::Arc;

use poke_explorer_catalog::{Argon2Verifier, ExplorerConfig, UserScopedStore, db};

/// Build a [`UserScopedStore`] from the environment configuration.
pub async fn store_from_env() -> Result<UserScopedStore, Box<dyn std::error::Error>> {
    let config = ExplorerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    Ok(UserScopedStore::new(pool, Arc::new(Argon2Verifier::default())))
}
