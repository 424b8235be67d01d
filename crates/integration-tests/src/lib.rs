//! Integration tests for Poke Explorer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p poke-explorer-integration-tests
//! ```
//!
//! Every test runs against an in-memory SQLite database with the real
//! migrations applied, and a scripted remote client instead of the network.
//!
//! # Test Categories
//!
//! - `store_accounts` - Registration, authentication, account deletion
//! - `store_favorites` - Favorite uniqueness, ordering, cascade
//! - `loader` - Paged loading, exhaustion, single-flight
//! - `coordinator` - Optimistic toggling and rollback
//!
//! This crate's library is test scaffolding: pool/store constructors and
//! [`ScriptedCatalogClient`], a deterministic stand-in for the remote.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{HashMap, VecDeque};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::Semaphore;

use poke_explorer_catalog::{
    Argon2Verifier, CatalogItemDetail, CatalogItemSummary, CatalogPage, RemoteCatalogClient,
    RemoteError, TypeTag, UserScopedStore, db,
};
use poke_explorer_core::ItemId;

/// Fresh in-memory database with migrations applied.
///
/// A single connection is mandatory: each `sqlite::memory:` connection is its
/// own database, so a larger pool would scatter the schema.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory options")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");

    db::MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

/// Store over the given pool with real argon2 hashing.
#[must_use]
pub fn store(pool: &SqlitePool) -> UserScopedStore {
    UserScopedStore::new(pool.clone(), Arc::new(Argon2Verifier::default()))
}

/// Summary for item `id`, with the canonical detail URL shape.
#[must_use]
pub fn summary(id: i64) -> CatalogItemSummary {
    CatalogItemSummary {
        name: format!("item-{id}"),
        url: detail_ref(id),
    }
}

/// Detail URL for item `id`.
#[must_use]
pub fn detail_ref(id: i64) -> String {
    format!("https://pokeapi.co/api/v2/pokemon/{id}/")
}

/// Page of `count` consecutive items starting at `start`.
#[must_use]
pub fn page(start: i64, count: u32, has_explicit_next: bool) -> CatalogPage {
    CatalogPage {
        items: (start..start + i64::from(count)).map(summary).collect(),
        has_explicit_next,
    }
}

/// Full detail for item `id`.
#[must_use]
pub fn detail(id: i64, name: &str) -> CatalogItemDetail {
    CatalogItemDetail {
        id: ItemId::new(id),
        name: name.to_owned(),
        height: 4,
        weight: 60,
        types: vec![TypeTag {
            slot: 1,
            name: "electric".to_owned(),
        }],
        official_artwork_url: Some(format!(
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png"
        )),
    }
}

/// One scripted page response.
enum PageScript {
    Page(CatalogPage),
    Fail,
}

/// Deterministic remote stand-in.
///
/// Page responses are consumed in push order; an empty script answers with an
/// empty page (an exhausted remote). Details are served by exact detail URL.
/// An optional gate parks every `fetch_page` until a permit is released,
/// which is how the single-flight tests hold a load in flight.
#[derive(Default)]
pub struct ScriptedCatalogClient {
    pages: Mutex<VecDeque<PageScript>>,
    details: Mutex<HashMap<String, CatalogItemDetail>>,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedCatalogClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose page fetches block on `gate` after being counted.
    #[must_use]
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Queue the next page response.
    pub fn push_page(&self, page: CatalogPage) {
        self.pages
            .lock()
            .expect("pages lock")
            .push_back(PageScript::Page(page));
    }

    /// Queue a failing page response.
    pub fn push_failure(&self) {
        self.pages
            .lock()
            .expect("pages lock")
            .push_back(PageScript::Fail);
    }

    /// Serve `detail` for its detail URL.
    pub fn insert_detail(&self, detail_ref: &str, detail: CatalogItemDetail) {
        self.details
            .lock()
            .expect("details lock")
            .insert(detail_ref.to_owned(), detail);
    }

    /// Number of `fetch_page` calls observed so far.
    #[must_use]
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_item_detail` calls observed so far.
    #[must_use]
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

impl RemoteCatalogClient for ScriptedCatalogClient {
    async fn fetch_page(&self, _limit: u32, _offset: u32) -> Result<CatalogPage, RemoteError> {
        // Count before gating so a parked call is still observable.
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gate.clone() {
            let permit = gate.acquire_owned().await.expect("gate closed");
            permit.forget();
        }

        let script = self.pages.lock().expect("pages lock").pop_front();
        match script {
            Some(PageScript::Page(page)) => Ok(page),
            Some(PageScript::Fail) => Err(RemoteError::Status {
                status: 500,
                body: "scripted failure".to_owned(),
            }),
            None => Ok(CatalogPage {
                items: Vec::new(),
                has_explicit_next: false,
            }),
        }
    }

    async fn fetch_item_detail(&self, detail_ref: &str) -> Result<CatalogItemDetail, RemoteError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        self.details
            .lock()
            .expect("details lock")
            .get(detail_ref)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(detail_ref.to_owned()))
    }
}
