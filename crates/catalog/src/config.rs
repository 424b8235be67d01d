//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with defaults suitable for local use:
//!
//! - `POKE_DATABASE_URL` - SQLite connection string (default: `sqlite://poke_explorer.db`)
//! - `POKE_API_BASE_URL` - Remote catalog base URL (default: `https://pokeapi.co/api/v2/`)
//! - `POKE_PAGE_SIZE` - Items per page for incremental loading (default: 20)
//! - `POKE_HTTP_TIMEOUT_SECS` - Remote request timeout (default: 30)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://poke_explorer.db";
const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";
const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog application configuration.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// SQLite database connection URL.
    pub database_url: String,
    /// Base URL of the remote catalog API (trailing slash significant for joins).
    pub api_base_url: String,
    /// Number of items fetched per page.
    pub page_size: u32,
    /// Timeout applied to every remote request.
    pub http_timeout: Duration,
}

impl ExplorerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a numeric variable is set but
    /// does not parse, or if `POKE_PAGE_SIZE` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env_or("POKE_DATABASE_URL", DEFAULT_DATABASE_URL);
        let api_base_url = env_or("POKE_API_BASE_URL", DEFAULT_API_BASE_URL);

        let page_size = match std::env::var("POKE_PAGE_SIZE") {
            Ok(raw) => parse_page_size(&raw)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let timeout_secs = match std::env::var("POKE_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("POKE_HTTP_TIMEOUT_SECS".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url,
            api_base_url,
            page_size,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    let value = raw
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar("POKE_PAGE_SIZE".to_owned(), e.to_string()))?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "POKE_PAGE_SIZE".to_owned(),
            "page size must be positive".to_owned(),
        ));
    }
    Ok(value)
}
