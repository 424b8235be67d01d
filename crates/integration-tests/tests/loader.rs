//! Integration tests for paged catalog loading.
//!
//! Covers offset monotonicity, exhaustion on short pages, failure isolation,
//! the single-flight latch, and the near-end proximity trigger.

use std::sync::Arc;

use tokio::sync::Semaphore;

use poke_explorer_catalog::PagedCatalogLoader;
use poke_explorer_integration_tests::{ScriptedCatalogClient, page};

const PAGE_SIZE: u32 = 20;

fn loader_over(client: Arc<ScriptedCatalogClient>) -> PagedCatalogLoader<ScriptedCatalogClient> {
    PagedCatalogLoader::new(client, PAGE_SIZE)
}

// ============================================================================
// Paging & offsets
// ============================================================================

#[tokio::test]
async fn test_first_page_accumulates_and_advances_offset() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 20);
    assert_eq!(state.offset, 20);
    assert!(state.can_load_more);
    assert!(!state.is_loading);
    assert_eq!(state.last_error, None);
}

#[tokio::test]
async fn test_pages_append_in_order() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    client.push_page(page(21, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;
    loader.load_next_page_if_needed().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 40);
    assert_eq!(state.offset, 40);
    let names: Vec<_> = state.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"item-1"));
    assert_eq!(names.last(), Some(&"item-40"));
}

// ============================================================================
// Exhaustion
// ============================================================================

#[tokio::test]
async fn test_short_page_exhausts_the_cursor() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    client.push_page(page(21, 5, false));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;
    loader.load_next_page_if_needed().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 25);
    assert!(!state.can_load_more);

    // Further requests never reach the remote.
    loader.load_next_page_if_needed().await;
    assert_eq!(client.page_calls(), 2);
}

#[tokio::test]
async fn test_empty_page_exhausts_the_cursor() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    // Script runs dry: the next fetch answers with an empty page.
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;
    loader.load_next_page_if_needed().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 20);
    assert_eq!(state.offset, 20);
    assert!(!state.can_load_more);
}

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn test_failed_page_leaves_accumulated_items_untouched() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    client.push_failure();
    client.push_page(page(21, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;
    loader.load_next_page_if_needed().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 20, "no partial append on failure");
    assert_eq!(state.offset, 20);
    assert!(state.can_load_more);
    assert!(!state.is_loading);
    assert!(state.last_error.as_deref().is_some_and(|e| e.contains("500")));

    // The retry consumes the same offset and clears the error.
    loader.load_next_page_if_needed().await;
    let state = loader.snapshot();
    assert_eq!(state.items.len(), 40);
    assert_eq!(state.last_error, None);
}

// ============================================================================
// Single flight
// ============================================================================

#[tokio::test]
async fn test_concurrent_loads_collapse_to_one_fetch() {
    let gate = Arc::new(Semaphore::new(0));
    let client = Arc::new(ScriptedCatalogClient::gated(Arc::clone(&gate)));
    client.push_page(page(1, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    // The first load parks on the gate; the second sees the latch and drops.
    // The third future releases the gate so the first can finish.
    tokio::join!(
        loader.reset_and_load_first_page(),
        loader.load_next_page_if_needed(),
        async {
            tokio::task::yield_now().await;
            gate.add_permits(1);
        }
    );

    assert_eq!(client.page_calls(), 1);
    let state = loader.snapshot();
    assert_eq!(state.items.len(), 20);
    assert_eq!(state.offset, 20);
}

// ============================================================================
// Proximity trigger
// ============================================================================

#[tokio::test]
async fn test_near_end_item_triggers_the_next_page() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    client.push_page(page(21, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;

    // Item 15 of 20 is outside the window of 5: no fetch.
    let outside = loader.snapshot().items.get(14).cloned().expect("item 15");
    loader.load_more_if_near(&outside).await;
    assert_eq!(client.page_calls(), 1);

    // Item 16 of 20 is inside the window: fetch.
    let inside = loader.snapshot().items.get(15).cloned().expect("item 16");
    loader.load_more_if_near(&inside).await;
    assert_eq!(client.page_calls(), 2);
    assert_eq!(loader.snapshot().items.len(), 40);
}

#[tokio::test]
async fn test_unknown_item_never_triggers() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;

    let stranger = poke_explorer_integration_tests::summary(9999);
    loader.load_more_if_near(&stranger).await;
    assert_eq!(client.page_calls(), 1);
}

// ============================================================================
// Bulk load & reset
// ============================================================================

#[tokio::test]
async fn test_load_all_remaining_replaces_and_disables_paging() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    client.push_page(page(1, 151, false));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;
    loader.load_all_remaining().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 151, "wholesale replacement, not append");
    assert_eq!(state.offset, 151);
    assert!(!state.can_load_more);

    loader.load_next_page_if_needed().await;
    assert_eq!(client.page_calls(), 2);
}

#[tokio::test]
async fn test_reset_discards_accumulated_state() {
    let client = Arc::new(ScriptedCatalogClient::new());
    client.push_page(page(1, PAGE_SIZE, true));
    client.push_page(page(21, 5, false));
    client.push_page(page(1, PAGE_SIZE, true));
    let loader = loader_over(Arc::clone(&client));

    loader.reset_and_load_first_page().await;
    loader.load_next_page_if_needed().await;
    assert!(!loader.snapshot().can_load_more);

    loader.reset_and_load_first_page().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 20);
    assert_eq!(state.offset, 20);
    assert!(state.can_load_more, "reset restores the cursor");
}
