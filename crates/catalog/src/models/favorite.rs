//! Favorite model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use poke_explorer_core::{AccountId, FavoriteId, ItemId};

/// One catalog item bookmarked by one account.
///
/// A projection of the remote item detail at the time it was favorited -
/// never mutated in place, only created and deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Favorite {
    /// Database identifier.
    pub id: FavoriteId,
    /// Owning account.
    pub account_id: AccountId,
    /// Remote catalog identifier of the favorited item.
    pub item_id: ItemId,
    /// Item name at favoriting time.
    pub display_name: String,
    /// Artwork URL at favoriting time, if the item had one.
    pub image_ref: Option<String>,
    /// When the item was favorited.
    pub favorited_at: DateTime<Utc>,
}
