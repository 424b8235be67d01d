//! Poke Explorer Catalog - data-access and state-synchronization core.
//!
//! This library is everything behind the screens of a catalog browser:
//!
//! - [`services::store::UserScopedStore`] - durable, user-scoped accounts and
//!   favorites over SQLite, with uniqueness and cascade invariants enforced by
//!   the schema.
//! - [`remote::HttpCatalogClient`] - PokéAPI client behind the
//!   [`remote::RemoteCatalogClient`] capability trait.
//! - [`loader::PagedCatalogLoader`] - incremental, single-flight paginated
//!   fetching into an observable ordered sequence.
//! - [`coordinator::FavoriteToggleCoordinator`] - optimistic favorite toggling
//!   with rollback, reconciled against the store.
//!
//! Presentation (views, navigation, image loading) lives elsewhere and
//! observes the loader/coordinator state through `tokio::sync::watch`
//! channels: current value plus notification on change.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod coordinator;
pub mod db;
pub mod error;
pub mod loader;
pub mod models;
pub mod remote;
pub mod services;

pub use config::ExplorerConfig;
pub use coordinator::{DetailState, FavoriteToggleCoordinator};
pub use error::{ExplorerError, Result};
pub use loader::{LoaderState, PagedCatalogLoader};
pub use models::{Account, Favorite};
pub use remote::{
    CatalogItemDetail, CatalogItemSummary, CatalogPage, HttpCatalogClient, RemoteCatalogClient,
    RemoteError, TypeTag,
};
pub use services::credentials::{Argon2Verifier, CredentialError, CredentialVerifier};
pub use services::store::{StoreError, UserScopedStore};
