//! Domain types for the remote catalog.

use serde::{Deserialize, Serialize};
use url::Url;

use poke_explorer_core::ItemId;

/// Base for the high-quality artwork derived from an item ID.
const OFFICIAL_ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// One entry of the remote catalog list.
///
/// The list payload carries no numeric ID; it is derived from the trailing
/// path segment of `url`. Two summaries with the same `url` are the same
/// entity for list-identity purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemSummary {
    /// Item name as listed.
    pub name: String,
    /// Detail reference; feed to `fetch_item_detail`.
    pub url: String,
}

impl CatalogItemSummary {
    /// Derive the stable numeric item ID from the detail URL.
    ///
    /// `https://pokeapi.co/api/v2/pokemon/25/` -> `25`. Returns `None` for a
    /// URL whose last path segment is not numeric.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        let parsed = Url::parse(&self.url).ok()?;
        let last = parsed.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
        last.parse::<i64>().ok().map(ItemId::new)
    }

    /// URL of the item's official artwork, derived from the item ID.
    #[must_use]
    pub fn official_artwork_url(&self) -> Option<String> {
        let id = self.item_id()?;
        Some(format!("{OFFICIAL_ARTWORK_BASE}/{id}.png"))
    }
}

/// One page of the remote catalog list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Items in remote order.
    pub items: Vec<CatalogItemSummary>,
    /// Whether the response carried an explicit next-page pointer. Surfaced
    /// for observability; the loader's cursor is driven by page fullness.
    pub has_explicit_next: bool,
}

/// One (slot, type name) tag on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag {
    /// Position of the tag.
    pub slot: i64,
    /// Type name.
    pub name: String,
}

/// Full remote detail of one catalog item.
///
/// Read-only; never persisted as-is. The store keeps only the
/// (id, name, artwork) projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemDetail {
    /// Stable numeric identifier.
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Height in decimetres.
    pub height: i64,
    /// Weight in hectograms.
    pub weight: i64,
    /// Type tags in slot order.
    pub types: Vec<TypeTag>,
    /// High-quality artwork URL, when present in the sprite set.
    pub official_artwork_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(url: &str) -> CatalogItemSummary {
        CatalogItemSummary {
            name: "pikachu".to_owned(),
            url: url.to_owned(),
        }
    }

    #[test]
    fn item_id_from_trailing_segment() {
        let s = summary("https://pokeapi.co/api/v2/pokemon/25/");
        assert_eq!(s.item_id(), Some(ItemId::new(25)));

        // no trailing slash
        let s = summary("https://pokeapi.co/api/v2/pokemon/133");
        assert_eq!(s.item_id(), Some(ItemId::new(133)));
    }

    #[test]
    fn item_id_rejects_non_numeric_and_relative() {
        assert_eq!(summary("https://pokeapi.co/api/v2/pokemon/").item_id(), None);
        assert_eq!(summary("not a url").item_id(), None);
    }

    #[test]
    fn artwork_url_embeds_the_id() {
        let s = summary("https://pokeapi.co/api/v2/pokemon/25/");
        let artwork = s.official_artwork_url().expect("artwork");
        assert!(artwork.ends_with("/official-artwork/25.png"));
    }

    #[test]
    fn same_url_means_same_identity() {
        let a = summary("https://pokeapi.co/api/v2/pokemon/25/");
        let mut b = a.clone();
        b.name = "PIKACHU".to_owned();
        assert_eq!(a.item_id(), b.item_id());
    }
}
