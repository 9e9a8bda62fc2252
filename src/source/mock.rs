//! Mock source implementations for isolating the engine in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::item::CatalogItem;
use crate::domain::types::ItemId;
use crate::query::remote::RemoteQuery;
use crate::source::errors::SourceResult;
use crate::source::{CatalogDirectory, CatalogPage, LocalCatalog, RemoteCatalog};

mock! {
    pub Catalog {}

    #[async_trait]
    impl RemoteCatalog for Catalog {
        async fn fetch_page(&self, query: &RemoteQuery) -> SourceResult<CatalogPage>;
    }

    #[async_trait]
    impl LocalCatalog for Catalog {
        async fn fetch_all(&self) -> SourceResult<Vec<CatalogItem>>;
    }

    #[async_trait]
    impl CatalogDirectory for Catalog {
        async fn categories(&self) -> SourceResult<Vec<String>>;
        async fn trending(&self, limit: usize) -> SourceResult<Vec<CatalogItem>>;
        async fn item(&self, id: &ItemId) -> SourceResult<Option<CatalogItem>>;
    }
}
