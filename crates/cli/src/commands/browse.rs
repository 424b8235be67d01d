//! Catalog browsing command.
//!
//! # Usage
//!
//! ```bash
//! # First page only
//! poke-explorer browse
//!
//! # Load three pages
//! poke-explorer browse --pages 3
//! ```
//!
//! # Environment Variables
//!
//! - `POKE_API_BASE_URL` - catalog API base (defaults to `https://pokeapi.co/api/v2/`)
//! - `POKE_PAGE_SIZE` - items per page (defaults to 20)

use std::sync::Arc;

use poke_explorer_catalog::{ExplorerConfig, HttpCatalogClient, PagedCatalogLoader};

/// Page through the remote catalog and print each item.
pub async fn run(pages: u32) -> Result<(), Box<dyn std::error::Error>> {
    let config = ExplorerConfig::from_env()?;
    let client = Arc::new(HttpCatalogClient::new(&config)?);
    let loader = PagedCatalogLoader::new(client, config.page_size);

    loader.reset_and_load_first_page().await;
    for _ in 1..pages {
        loader.load_next_page_if_needed().await;
    }

    let state = loader.snapshot();
    if let Some(error) = &state.last_error {
        return Err(error.clone().into());
    }

    #[allow(clippy::print_stdout)]
    {
        for (position, item) in state.items.iter().enumerate() {
            println!("{:>4}. {}", position + 1, item.name);
        }
        println!(
            "{} items loaded, more available: {}",
            state.items.len(),
            state.can_load_more
        );
    }
    Ok(())
}
