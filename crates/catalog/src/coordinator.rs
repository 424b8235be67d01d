//! Optimistic favorite toggling against the user-scoped store.
//!
//! One coordinator per open item detail. `load_detail` fetches the remote
//! detail and seeds the favorite flag from the store; `toggle_favorite`
//! flips the flag optimistically, confirms the mutation, and rolls the flag
//! back to its exact prior value if the mutation fails.
//!
//! Toggles are serialized by an in-flight latch: a toggle arriving while one
//! is outstanding is dropped, not queued, so rapid repeated taps cannot race
//! duplicate mutations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::models::Account;
use crate::remote::{CatalogItemDetail, RemoteCatalogClient};
use crate::services::store::UserScopedStore;

/// Observable detail-screen state.
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    /// Remote detail, present once the fetch has succeeded.
    pub detail: Option<CatalogItemDetail>,
    /// Whether the owning account currently favorites this item, as last
    /// reconciled against the store.
    pub is_favorited: bool,
    /// Whether a detail fetch is in flight.
    pub is_loading: bool,
    /// Message of the most recent failure.
    pub last_error: Option<String>,
}

/// Coordinates one item's favorite state between store and remote detail.
pub struct FavoriteToggleCoordinator<C> {
    client: Arc<C>,
    store: UserScopedStore,
    account: Account,
    detail_ref: String,
    busy: AtomicBool,
    state: watch::Sender<DetailState>,
}

impl<C: RemoteCatalogClient> FavoriteToggleCoordinator<C> {
    /// Create a coordinator for one item, scoped to one account.
    ///
    /// Call [`load_detail`](Self::load_detail) afterwards; toggling is
    /// refused until the detail has loaded.
    #[must_use]
    pub fn new(
        client: Arc<C>,
        store: UserScopedStore,
        account: Account,
        detail_ref: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            client,
            store,
            account,
            detail_ref: detail_ref.into(),
            busy: AtomicBool::new(false),
            state,
        }
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    /// Fetch the item detail and seed the favorite flag from the store.
    ///
    /// On fetch failure the error is recorded and the detail stays absent;
    /// the coordinator can be retried.
    pub async fn load_detail(&self) {
        if !self.acquire_latch() {
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        match self.client.fetch_item_detail(&self.detail_ref).await {
            Ok(detail) => {
                let favorited = self.store.is_favorite(detail.id, &self.account).await;
                self.state.send_modify(|s| {
                    s.detail = Some(detail);
                    s.is_favorited = favorited;
                    s.is_loading = false;
                });
            }
            Err(err) => {
                self.state.send_modify(|s| {
                    s.last_error = Some(err.to_string());
                    s.is_loading = false;
                });
            }
        }

        self.release_latch();
    }

    /// Toggle the favorite state of the loaded item.
    ///
    /// No-op if the detail has not loaded or a toggle is already in flight.
    /// Optimistic: the flag flips before the store confirms; a failed
    /// mutation restores the exact prior value and records the error.
    pub async fn toggle_favorite(&self) {
        let Some(detail) = self.state.borrow().detail.clone() else {
            return;
        };
        if !self.acquire_latch() {
            return;
        }

        let currently = self.store.is_favorite(detail.id, &self.account).await;

        self.state.send_modify(|s| {
            s.is_favorited = !currently;
            s.last_error = None;
        });

        let result = if currently {
            self.store.remove_favorite(detail.id, &self.account).await
        } else {
            self.store.add_favorite(&detail, &self.account).await
        };

        if let Err(err) = result {
            tracing::warn!(item_id = %detail.id, error = %err, "favorite toggle failed, rolling back");
            self.state.send_modify(|s| {
                s.is_favorited = currently;
                s.last_error = Some(err.to_string());
            });
        }

        self.release_latch();
    }

    fn acquire_latch(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn release_latch(&self) {
        self.busy.store(false, Ordering::Release);
    }
}
