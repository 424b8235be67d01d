//! Core types for Poke Explorer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod username;

pub use email::{Email, EmailError};
pub use id::*;
pub use username::{Username, UsernameError};
