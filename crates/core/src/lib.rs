//! Poke Explorer Core - Shared types library.
//!
//! This crate provides common types used across all Poke Explorer components:
//! - `catalog` - Data-access library (store, loader, coordinator)
//! - `cli` - Command-line tools for migrations and catalog browsing
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, usernames, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
