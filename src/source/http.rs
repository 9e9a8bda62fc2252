//! Catalog source backed by the directory REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::item::CatalogItem;
use crate::domain::types::ItemId;
use crate::query::remote::RemoteQuery;
use crate::source::errors::{SourceError, SourceResult};
use crate::source::{CatalogDirectory, CatalogPage, RemoteCatalog};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the `/api` endpoints of the directory backend.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client rooted at `base_url`, e.g. `https://host/api`.
    pub fn new(base_url: &str) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> SourceResult<Self> {
        // `Url::join` replaces the last segment unless the base ends with '/'.
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> SourceResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.base_url.join(path)?;
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn fetch_page(&self, query: &RemoteQuery) -> SourceResult<CatalogPage> {
        self.get_json("channels", query).await
    }
}

#[async_trait]
impl CatalogDirectory for HttpCatalog {
    async fn categories(&self) -> SourceResult<Vec<String>> {
        self.get_json("categories", &()).await
    }

    async fn trending(&self, limit: usize) -> SourceResult<Vec<CatalogItem>> {
        self.get_json("channels/top", &[("limit", limit)]).await
    }

    async fn item(&self, id: &ItemId) -> SourceResult<Option<CatalogItem>> {
        let mut url = self.base_url.join("channels/")?;
        url.path_segments_mut()
            .map_err(|_| SourceError::ValidationError("Base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let item = response.error_for_status()?.json::<CatalogItem>().await?;
        Ok(Some(item))
    }
}
