mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use teleindex_catalog::domain::criteria::{FilterCriteria, Metric, NumericRange};
use teleindex_catalog::engine::{EngineSettings, QueryEngine, Resolution, SourceMode};
use teleindex_catalog::query::remote::RemoteQuery;
use teleindex_catalog::query::sort::SortMode;
use teleindex_catalog::source::errors::{SourceError, SourceResult};
use teleindex_catalog::source::memory::MemoryCatalog;
use teleindex_catalog::source::{CatalogPage, RemoteCatalog};

use common::dataset_48;

/// Remote that answers from a dataset after a per-query delay.
struct DelayedCatalog {
    inner: MemoryCatalog,
    search_delay: Duration,
    plain_delay: Duration,
}

#[async_trait]
impl RemoteCatalog for DelayedCatalog {
    async fn fetch_page(&self, query: &RemoteQuery) -> SourceResult<CatalogPage> {
        let delay = if query.q.is_some() {
            self.search_delay
        } else {
            self.plain_delay
        };
        tokio::time::sleep(delay).await;
        self.inner.fetch_page(query).await
    }
}

struct DownCatalog;

#[async_trait]
impl RemoteCatalog for DownCatalog {
    async fn fetch_page(&self, _query: &RemoteQuery) -> SourceResult<CatalogPage> {
        Err(SourceError::Http("connection refused".to_string()))
    }
}

fn settings() -> EngineSettings {
    EngineSettings {
        page_size: 24,
        window_size: 5,
    }
}

fn min_subscribers(value: f64) -> FilterCriteria {
    FilterCriteria::channels().with_range(Metric::Subscribers, NumericRange::at_least(value))
}

#[tokio::test]
async fn local_price_sort_over_filtered_dataset() {
    let mut engine = QueryEngine::new(DownCatalog, MemoryCatalog::new(dataset_48()), settings());
    engine.set_criteria(min_subscribers(10_000.0));
    engine.set_sort(SortMode::Price);

    let page = engine.refresh().await.unwrap();
    assert!(page.items.len() <= 24);
    assert!(!page.items.is_empty());
    assert!(page.items.iter().all(|item| item.subscribers.unwrap() >= 10_000));

    for pair in page.items.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        // Unpriced channels rank as price zero.
        let (pa, pb) = (a.price.unwrap_or(0.0), b.price.unwrap_or(0.0));
        assert!(pa >= pb, "{} before {}", a.id, b.id);
        if pa == pb {
            assert!(a.subscribers >= b.subscribers, "{} before {}", a.id, b.id);
        }
    }
    assert_eq!(engine.mode(), SourceMode::Fallback);
}

#[tokio::test]
async fn remote_and_fallback_agree_on_every_sort_mode() {
    let dataset = dataset_48();
    let criteria = min_subscribers(5_000.0);

    for sort in SortMode::ALL {
        let mut remote = QueryEngine::new(
            MemoryCatalog::new(dataset.clone()),
            MemoryCatalog::default(),
            settings(),
        );
        let mut local = QueryEngine::new(DownCatalog, MemoryCatalog::new(dataset.clone()), settings());

        for engine_page in [1, 2] {
            remote.set_criteria(criteria.clone());
            remote.set_sort(sort);
            remote.set_page(engine_page);
            local.set_criteria(criteria.clone());
            local.set_sort(sort);
            local.set_page(engine_page);

            let remote_page = remote.refresh().await.unwrap().clone();
            let local_page = local.refresh().await.unwrap().clone();
            assert_eq!(remote_page, local_page, "sort {sort} page {engine_page}");
        }
        assert_eq!(remote.mode(), SourceMode::Remote);
        assert_eq!(local.mode(), SourceMode::Fallback);
    }
}

#[tokio::test]
async fn facet_change_on_page_four_restarts_at_page_one() {
    let mut engine = QueryEngine::new(
        MemoryCatalog::new(dataset_48()),
        MemoryCatalog::default(),
        EngineSettings {
            page_size: 10,
            window_size: 5,
        },
    );
    engine.set_page(4);
    assert_eq!(engine.refresh().await.unwrap().page, 4);

    engine.set_criteria(FilterCriteria::channels().category("Tech"));
    let page = engine.refresh().await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total, 24);
    assert_eq!(page.pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn out_of_range_page_clamps_to_last() {
    let mut engine = QueryEngine::new(
        MemoryCatalog::new(dataset_48()),
        MemoryCatalog::default(),
        settings(),
    );
    engine.set_page(9);

    let page = engine.refresh().await.unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 24);
    assert_eq!(engine.query().page, 2);
}

#[tokio::test]
async fn superseded_page_response_is_discarded() {
    let remote = DelayedCatalog {
        inner: MemoryCatalog::new(dataset_48()),
        search_delay: Duration::from_millis(80),
        plain_delay: Duration::from_millis(5),
    };
    let mut engine = QueryEngine::new(remote, MemoryCatalog::default(), settings());
    let remote = engine.remote();
    let (tx, mut rx) = mpsc::unbounded_channel();

    engine.set_page(2);
    let page_two = engine.begin().unwrap();

    engine.set_criteria(FilterCriteria::channels().search("Channel 1"));
    let search = engine.begin().unwrap();
    let latest = search.generation();

    for ticket in [page_two, search] {
        let remote = Arc::clone(&remote);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = ticket.fetch(remote.as_ref()).await;
            let _ = tx.send(outcome);
        });
    }
    drop(tx);

    let mut resolutions = Vec::new();
    while let Some(outcome) = rx.recv().await {
        let generation = outcome.generation();
        resolutions.push((generation == latest, engine.complete(outcome).await.unwrap()));
    }

    // Page two arrives first and is dropped; the search result is rendered.
    assert_eq!(
        resolutions,
        vec![(false, Resolution::Stale), (true, Resolution::Applied)]
    );
    let page = engine.current().unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total, 10);
    assert!(page.items.iter().all(|item| item.name.starts_with("Channel 1")));
}

#[tokio::test]
async fn late_stale_response_does_not_overwrite_latest() {
    let remote = DelayedCatalog {
        inner: MemoryCatalog::new(dataset_48()),
        search_delay: Duration::from_millis(5),
        plain_delay: Duration::from_millis(80),
    };
    let mut engine = QueryEngine::new(remote, MemoryCatalog::default(), settings());
    let remote = engine.remote();

    engine.set_page(2);
    let slow = engine.begin().unwrap();
    engine.set_criteria(FilterCriteria::channels().search("Channel 2"));
    let fast = engine.begin().unwrap();

    let (slow_outcome, fast_outcome) =
        tokio::join!(slow.fetch(remote.as_ref()), fast.fetch(remote.as_ref()));

    assert_eq!(engine.complete(fast_outcome).await.unwrap(), Resolution::Applied);
    let rendered = engine.current().unwrap().clone();
    assert_eq!(engine.complete(slow_outcome).await.unwrap(), Resolution::Stale);
    assert_eq!(engine.current(), Some(&rendered));
}

#[tokio::test]
async fn fallback_without_local_data_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(MemoryCatalog::from_path(&missing).is_err());

    let path = dir.path().join("channels.json");
    std::fs::write(&path, serde_json::to_string(&dataset_48()).unwrap()).unwrap();
    let local = MemoryCatalog::from_path(&path).unwrap();

    let mut engine = QueryEngine::new(DownCatalog, local, settings());
    let page = engine.refresh().await.unwrap();
    assert_eq!(page.total, 48);
    assert_eq!(page.page_count, 2);
}
