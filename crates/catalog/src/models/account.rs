//! Account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use poke_explorer_core::{AccountId, Email, Username};

/// A registered user.
///
/// Owns zero or more [`Favorite`](super::Favorite)s; deleting an account
/// cascades to them. The password digest is never carried on this struct -
/// it stays inside the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Database identifier.
    pub id: AccountId,
    /// Unique login name (case-sensitive).
    pub username: Username,
    /// Contact email.
    pub email: Email,
    /// When the account was created.
    pub registered_at: DateTime<Utc>,
}
