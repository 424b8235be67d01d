//! Integration tests for optimistic favorite toggling.
//!
//! Covers the load-then-seed flow, toggling against the store, the
//! detail-gated no-op, and rollback when the store rejects the mutation.

use std::sync::Arc;

use poke_explorer_catalog::db::AccountRepository;
use poke_explorer_catalog::{Account, FavoriteToggleCoordinator, UserScopedStore};
use poke_explorer_core::ItemId;
use poke_explorer_integration_tests::{
    ScriptedCatalogClient, detail, detail_ref, memory_pool, store,
};

async fn signup(store: &UserScopedStore, username: &str) -> Account {
    store
        .create_account(username, &format!("{username}@example.com"), "pikachu123")
        .await
        .expect("signup")
}

fn coordinator_for(
    client: Arc<ScriptedCatalogClient>,
    store: UserScopedStore,
    account: Account,
    id: i64,
) -> FavoriteToggleCoordinator<ScriptedCatalogClient> {
    FavoriteToggleCoordinator::new(client, store, account, detail_ref(id))
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_load_detail_seeds_favorite_flag_from_store() {
    let pool = memory_pool().await;
    let store = store(&pool);
    let ash = signup(&store, "ash").await;

    let pikachu = detail(25, "pikachu");
    store
        .add_favorite(&pikachu, &ash)
        .await
        .expect("pre-favorited");

    let client = Arc::new(ScriptedCatalogClient::new());
    client.insert_detail(&detail_ref(25), pikachu);
    let coordinator = coordinator_for(client, store, ash, 25);

    coordinator.load_detail().await;

    let state = coordinator.snapshot();
    assert_eq!(state.detail.as_ref().map(|d| d.name.as_str()), Some("pikachu"));
    assert!(state.is_favorited);
    assert!(!state.is_loading);
    assert_eq!(state.last_error, None);
}

#[tokio::test]
async fn test_failed_detail_fetch_records_error_and_allows_retry() {
    let pool = memory_pool().await;
    let store = store(&pool);
    let ash = signup(&store, "ash").await;

    let client = Arc::new(ScriptedCatalogClient::new());
    let coordinator = coordinator_for(Arc::clone(&client), store, ash, 25);

    coordinator.load_detail().await;

    let state = coordinator.snapshot();
    assert!(state.detail.is_none());
    assert!(state.last_error.is_some());
    assert!(!state.is_loading);

    // The detail arrives; a retry clears the error.
    client.insert_detail(&detail_ref(25), detail(25, "pikachu"));
    coordinator.load_detail().await;

    let state = coordinator.snapshot();
    assert!(state.detail.is_some());
    assert_eq!(state.last_error, None);
}

// ============================================================================
// Toggling
// ============================================================================

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    let pool = memory_pool().await;
    let store = store(&pool);
    let ash = signup(&store, "ash").await;

    let client = Arc::new(ScriptedCatalogClient::new());
    client.insert_detail(&detail_ref(25), detail(25, "pikachu"));
    let coordinator = coordinator_for(client, store.clone(), ash.clone(), 25);

    coordinator.load_detail().await;
    assert!(!coordinator.snapshot().is_favorited);

    coordinator.toggle_favorite().await;
    assert!(coordinator.snapshot().is_favorited);
    assert!(store.is_favorite(ItemId::new(25), &ash).await);

    coordinator.toggle_favorite().await;
    assert!(!coordinator.snapshot().is_favorited);
    assert!(!store.is_favorite(ItemId::new(25), &ash).await);
}

#[tokio::test]
async fn test_concurrent_toggles_collapse_to_one_mutation() {
    let pool = memory_pool().await;
    let store = store(&pool);
    let ash = signup(&store, "ash").await;

    let client = Arc::new(ScriptedCatalogClient::new());
    client.insert_detail(&detail_ref(25), detail(25, "pikachu"));
    let coordinator = coordinator_for(client, store.clone(), ash.clone(), 25);

    coordinator.load_detail().await;

    // The first toggle holds the latch while it awaits the store; the
    // second sees the latch and drops. Were both applied they would cancel
    // out to "not favorited" with zero rows.
    tokio::join!(coordinator.toggle_favorite(), coordinator.toggle_favorite());

    assert!(coordinator.snapshot().is_favorited);
    assert!(store.is_favorite(ItemId::new(25), &ash).await);
    assert_eq!(store.favorites_for(&ash).await.expect("list").len(), 1);
}

#[tokio::test]
async fn test_toggle_before_load_is_a_noop() {
    let pool = memory_pool().await;
    let store = store(&pool);
    let ash = signup(&store, "ash").await;

    let client = Arc::new(ScriptedCatalogClient::new());
    let coordinator = coordinator_for(client, store.clone(), ash.clone(), 25);

    coordinator.toggle_favorite().await;

    assert!(!coordinator.snapshot().is_favorited);
    assert!(!store.is_favorite(ItemId::new(25), &ash).await);
    assert!(store.favorites_for(&ash).await.expect("list").is_empty());
}

// ============================================================================
// Rollback
// ============================================================================

#[tokio::test]
async fn test_failed_mutation_rolls_the_flag_back() {
    let pool = memory_pool().await;
    let store = store(&pool);
    let ash = signup(&store, "ash").await;

    let client = Arc::new(ScriptedCatalogClient::new());
    client.insert_detail(&detail_ref(25), detail(25, "pikachu"));
    let coordinator = coordinator_for(client, store, ash.clone(), 25);

    coordinator.load_detail().await;
    assert!(!coordinator.snapshot().is_favorited);

    // Pull the account out from under the coordinator; the favorite insert
    // now violates the foreign key.
    let deleted = AccountRepository::new(&pool)
        .delete(ash.id)
        .await
        .expect("delete account");
    assert!(deleted);

    coordinator.toggle_favorite().await;

    let state = coordinator.snapshot();
    assert!(!state.is_favorited, "flag restored to its prior value");
    assert!(state.last_error.is_some());
}
