//! Data sources feeding the query engine.
//!
//! A remote source answers one page per [`RemoteQuery`]; a local source
//! hands over its whole collection once. Both report results in the same
//! [`CatalogPage`] shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::item::CatalogItem;
use crate::domain::types::ItemId;
use crate::query::remote::RemoteQuery;
use crate::source::errors::SourceResult;

pub mod errors;
#[cfg(feature = "client")]
pub mod http;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

const fn first_page() -> usize {
    1
}

/// One page of results. `total` is authoritative for pagination even when
/// the final page carries fewer than `limit` items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total: usize,
    #[serde(default = "first_page")]
    pub page: usize,
}

impl CatalogPage {
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
        }
    }
}

/// Paged source that filters and sorts on its side.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn fetch_page(&self, query: &RemoteQuery) -> SourceResult<CatalogPage>;
}

/// Source that supplies its full collection for local evaluation.
#[async_trait]
pub trait LocalCatalog: Send + Sync {
    async fn fetch_all(&self) -> SourceResult<Vec<CatalogItem>>;
}

/// Auxiliary lookups shown next to the catalog.
#[async_trait]
pub trait CatalogDirectory: Send + Sync {
    async fn categories(&self) -> SourceResult<Vec<String>>;
    async fn trending(&self, limit: usize) -> SourceResult<Vec<CatalogItem>>;
    async fn item(&self, id: &ItemId) -> SourceResult<Option<CatalogItem>>;
}
