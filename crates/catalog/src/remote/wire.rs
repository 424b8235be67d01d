//! Wire envelopes for the remote catalog payloads.
//!
//! Kept separate from the domain types so the API's nested sprite shape
//! never leaks past this module.

use serde::Deserialize;

use poke_explorer_core::ItemId;

use super::types::{CatalogItemDetail, CatalogItemSummary, CatalogPage, TypeTag};

/// Paged list response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct PageEnvelope {
    #[allow(dead_code)]
    pub count: u64,
    pub next: Option<String>,
    #[allow(dead_code)]
    pub previous: Option<String>,
    pub results: Vec<SummaryEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummaryEntry {
    pub name: String,
    pub url: String,
}

impl From<PageEnvelope> for CatalogPage {
    fn from(envelope: PageEnvelope) -> Self {
        Self {
            has_explicit_next: envelope.next.is_some(),
            items: envelope
                .results
                .into_iter()
                .map(|entry| CatalogItemSummary {
                    name: entry.name,
                    url: entry.url,
                })
                .collect(),
        }
    }
}

/// Item detail response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct DetailEnvelope {
    pub id: i64,
    pub name: String,
    pub height: i64,
    pub weight: i64,
    pub types: Vec<TypeEntry>,
    pub sprites: SpritesEntry,
}

#[derive(Debug, Deserialize)]
pub(super) struct TypeEntry {
    pub slot: i64,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(super) struct NamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SpritesEntry {
    #[allow(dead_code)]
    pub front_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<ArtworkEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtworkEntry {
    pub front_default: Option<String>,
}

impl From<DetailEnvelope> for CatalogItemDetail {
    fn from(envelope: DetailEnvelope) -> Self {
        let official_artwork_url = envelope
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);

        Self {
            id: ItemId::new(envelope.id),
            name: envelope.name,
            height: envelope.height,
            weight: envelope.weight,
            types: envelope
                .types
                .into_iter()
                .map(|t| TypeTag {
                    slot: t.slot,
                    name: t.type_ref.name,
                })
                .collect(),
            official_artwork_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_envelope_parses_and_converts() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;

        let envelope: PageEnvelope = serde_json::from_str(json).expect("parse");
        let page = CatalogPage::from(envelope);

        assert_eq!(page.items.len(), 2);
        assert!(page.has_explicit_next);
        assert_eq!(page.items.first().map(|i| i.name.as_str()), Some("bulbasaur"));
        assert_eq!(
            page.items.first().and_then(CatalogItemSummary::item_id),
            Some(ItemId::new(1))
        );
    }

    #[test]
    fn last_page_has_no_next_pointer() {
        let json = r#"{"count": 2, "next": null, "previous": null, "results": []}"#;
        let envelope: PageEnvelope = serde_json::from_str(json).expect("parse");
        let page = CatalogPage::from(envelope);

        assert!(page.items.is_empty());
        assert!(!page.has_explicit_next);
    }

    #[test]
    fn detail_envelope_parses_and_converts() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [
                {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
            ],
            "sprites": {
                "front_default": "https://example.test/front.png",
                "other": {
                    "official-artwork": {
                        "front_default": "https://example.test/artwork.png"
                    }
                }
            }
        }"#;

        let envelope: DetailEnvelope = serde_json::from_str(json).expect("parse");
        let detail = CatalogItemDetail::from(envelope);

        assert_eq!(detail.id, ItemId::new(25));
        assert_eq!(detail.name, "pikachu");
        assert_eq!(detail.height, 4);
        assert_eq!(detail.weight, 60);
        assert_eq!(
            detail.types,
            vec![TypeTag {
                slot: 1,
                name: "electric".to_owned()
            }]
        );
        assert_eq!(
            detail.official_artwork_url.as_deref(),
            Some("https://example.test/artwork.png")
        );
    }

    #[test]
    fn detail_without_artwork_is_fine() {
        let json = r#"{
            "id": 132,
            "name": "ditto",
            "height": 3,
            "weight": 40,
            "types": [],
            "sprites": {"front_default": null, "other": null}
        }"#;

        let envelope: DetailEnvelope = serde_json::from_str(json).expect("parse");
        let detail = CatalogItemDetail::from(envelope);

        assert_eq!(detail.official_artwork_url, None);
    }
}
