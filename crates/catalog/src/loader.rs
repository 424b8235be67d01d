//! Incremental, single-flight paginated catalog loading.
//!
//! The loader pulls pages on demand and appends them to an observable
//! ordered sequence. Observers hold a `watch::Receiver` and see the current
//! [`LoaderState`] plus a notification on every change.
//!
//! Within one loader instance page loads are serialized by an atomic
//! in-flight latch: a call that arrives while a load is outstanding is
//! dropped, not queued. Items are never reordered or deduplicated across
//! pages; if the remote returns overlapping pages the overlap is kept.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::remote::{CatalogItemSummary, RemoteCatalogClient};

/// How close to the end of the accumulated sequence a visible item must be
/// to trigger the next page load.
const NEAR_END_WINDOW: usize = 5;

/// Limit used by the bulk load path to materialize the whole catalog.
const BULK_FETCH_LIMIT: u32 = 100_000;

/// Observable loader state.
#[derive(Debug, Clone)]
pub struct LoaderState {
    /// Accumulated items, in remote order.
    pub items: Vec<CatalogItemSummary>,
    /// Offset of the next page to fetch.
    pub offset: u32,
    /// Whether another page may exist. A short page (fewer than `page_size`
    /// items, including zero) exhausts the cursor.
    pub can_load_more: bool,
    /// Whether a load is currently in flight.
    pub is_loading: bool,
    /// Message of the most recent failure, cleared on the next attempt.
    pub last_error: Option<String>,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            can_load_more: true,
            is_loading: false,
            last_error: None,
        }
    }
}

/// Pulls the remote catalog page by page into an observable sequence.
pub struct PagedCatalogLoader<C> {
    client: Arc<C>,
    page_size: u32,
    in_flight: AtomicBool,
    state: watch::Sender<LoaderState>,
}

impl<C: RemoteCatalogClient> PagedCatalogLoader<C> {
    /// Create a loader over a remote client with a fixed page size.
    #[must_use]
    pub fn new(client: Arc<C>, page_size: u32) -> Self {
        let (state, _) = watch::channel(LoaderState::default());
        Self {
            client,
            page_size,
            in_flight: AtomicBool::new(false),
            state,
        }
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> LoaderState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoaderState> {
        self.state.subscribe()
    }

    /// Clear everything and load the first page.
    ///
    /// Dropped (like any other load) if a load is already in flight.
    pub async fn reset_and_load_first_page(&self) {
        if !self.acquire_latch() {
            return;
        }

        self.state.send_modify(|s| {
            *s = LoaderState::default();
            s.is_loading = true;
        });

        self.fetch_and_append(0).await;
    }

    /// Load the next page unless exhausted or already loading.
    pub async fn load_next_page_if_needed(&self) {
        if !self.state.borrow().can_load_more {
            return;
        }
        if !self.acquire_latch() {
            return;
        }

        // Re-read under the latch; an exhausting load may have landed between
        // the check and the acquire.
        let offset = {
            let s = self.state.borrow();
            if !s.can_load_more {
                self.release_latch();
                return;
            }
            s.offset
        };

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        self.fetch_and_append(offset).await;
    }

    /// Fetch the whole catalog in one oversized page, replacing the
    /// accumulated sequence and disabling incremental loading.
    pub async fn load_all_remaining(&self) {
        if !self.acquire_latch() {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        let result = self.client.fetch_page(BULK_FETCH_LIMIT, 0).await;

        self.state.send_modify(|s| {
            match result {
                Ok(page) => {
                    s.offset = page.items.len() as u32;
                    s.items = page.items;
                    s.can_load_more = false;
                }
                Err(err) => s.last_error = Some(err.to_string()),
            }
            s.is_loading = false;
        });

        self.release_latch();
    }

    /// Proximity trigger: load the next page when `visible` sits within
    /// [`NEAR_END_WINDOW`] items of the end of the accumulated sequence.
    /// Identity is by detail URL.
    pub async fn load_more_if_near(&self, visible: &CatalogItemSummary) {
        let near_end = {
            let s = self.state.borrow();
            s.items
                .iter()
                .rposition(|item| item.url == visible.url)
                .is_some_and(|idx| idx + NEAR_END_WINDOW >= s.items.len())
        };

        if near_end {
            self.load_next_page_if_needed().await;
        }
    }

    /// Fetch one page at `offset` and fold the outcome into the state.
    /// A failed fetch leaves items and offset untouched - no partial append.
    async fn fetch_and_append(&self, offset: u32) {
        let result = self.client.fetch_page(self.page_size, offset).await;
        let page_size = self.page_size;

        self.state.send_modify(|s| {
            match result {
                Ok(page) => {
                    let returned = page.items.len() as u32;
                    s.items.extend(page.items);
                    s.offset += returned;
                    s.can_load_more = returned == page_size;
                }
                Err(err) => {
                    tracing::warn!(offset, error = %err, "page load failed");
                    s.last_error = Some(err.to_string());
                }
            }
            s.is_loading = false;
        });

        self.release_latch();
    }

    fn acquire_latch(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn release_latch(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
