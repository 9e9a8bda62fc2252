//! In-memory catalog backed by a JSON dataset.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::item::{CatalogItem, ModerationStatus};
use crate::domain::types::ItemId;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageRequest};
use crate::query::remote::RemoteQuery;
use crate::query::run_local;
use crate::query::sort::{SortMode, sort_items};
use crate::source::errors::SourceResult;
use crate::source::{CatalogDirectory, CatalogPage, LocalCatalog, RemoteCatalog};

/// Materialized collection shared cheaply between clones.
///
/// Also answers paged queries with the local pipeline, which makes it a
/// drop-in remote source for the API server and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    items: Arc<Vec<CatalogItem>>,
    default_categories: Vec<String>,
}

impl MemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(items),
            default_categories: Vec::new(),
        }
    }

    /// Categories reported when no item carries one.
    pub fn with_default_categories(mut self, categories: Vec<String>) -> Self {
        self.default_categories = categories;
        self
    }

    /// Parses a JSON array of catalog items.
    pub fn from_json_str(json: &str) -> SourceResult<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    pub fn from_path(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        log::info!(
            "Loaded {} catalog items from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MemoryCatalog {
    fn public_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.status.is_public())
    }
}

/// The local collection is the public catalog: approved entries only.
#[async_trait]
impl LocalCatalog for MemoryCatalog {
    async fn fetch_all(&self) -> SourceResult<Vec<CatalogItem>> {
        Ok(self.public_items().cloned().collect())
    }
}

#[async_trait]
impl RemoteCatalog for MemoryCatalog {
    async fn fetch_page(&self, query: &RemoteQuery) -> SourceResult<CatalogPage> {
        let request = PageRequest::new(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        );
        let mut criteria = query.criteria();
        criteria.status.get_or_insert(ModerationStatus::Approved);
        let page = run_local(
            &self.items,
            &criteria,
            query.sort.unwrap_or_default(),
            request,
        );

        Ok(CatalogPage {
            items: page.items,
            total: page.total,
            page: page.window.page,
        })
    }
}

#[async_trait]
impl CatalogDirectory for MemoryCatalog {
    async fn categories(&self) -> SourceResult<Vec<String>> {
        let categories: BTreeSet<&str> = self
            .items
            .iter()
            .filter_map(|item| item.category.as_deref())
            .collect();

        if categories.is_empty() {
            return Ok(self.default_categories.clone());
        }
        Ok(categories.into_iter().map(str::to_string).collect())
    }

    async fn trending(&self, limit: usize) -> SourceResult<Vec<CatalogItem>> {
        let mut items: Vec<CatalogItem> = self.public_items().cloned().collect();
        sort_items(&mut items, SortMode::Popularity);
        items.truncate(limit);
        Ok(items)
    }

    async fn item(&self, id: &ItemId) -> SourceResult<Option<CatalogItem>> {
        Ok(self.items.iter().find(|item| &item.id == id).cloned())
    }
}
