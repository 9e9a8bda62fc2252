//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

const DEFAULT_TRENDING_LIMIT: usize = 10;

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_trending_limit() -> usize {
    DEFAULT_TRENDING_LIMIT
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the catalog API server.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// JSON array of catalog items served by the API.
    pub dataset_path: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
    /// Reported by `/api/categories` when the dataset carries none.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}
