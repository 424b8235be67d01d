//! Account commands: signup, login, favorites.
//!
//! # Usage
//!
//! ```bash
//! poke-explorer signup -u ash -e ash@example.com -p pikachu123
//! poke-explorer login -u ash -p pikachu123
//! poke-explorer favorites -u ash -p pikachu123
//! ```

use super::store_from_env;

/// Create a new account.
pub async fn signup(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = store_from_env().await?;
    let account = store.create_account(username, email, password).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Created account '{}' (id {})", account.username, account.id);
    }
    Ok(())
}

/// Verify credentials for an account.
pub async fn login(username: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = store_from_env().await?;
    let account = store.authenticate(username, password).await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Authenticated '{}' (registered {})",
            account.username, account.registered_at
        );
    }
    Ok(())
}

/// List an account's favorites, newest first.
pub async fn favorites(username: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = store_from_env().await?;
    let account = store.authenticate(username, password).await?;
    let favorites = store.favorites_for(&account).await?;

    #[allow(clippy::print_stdout)]
    {
        if favorites.is_empty() {
            println!("No favorites yet");
        } else {
            for favorite in &favorites {
                println!(
                    "#{:<5} {:<20} favorited {}",
                    favorite.item_id, favorite.display_name, favorite.favorited_at
                );
            }
        }
    }
    Ok(())
}
