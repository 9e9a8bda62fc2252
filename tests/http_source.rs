use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use teleindex_catalog::domain::criteria::{FilterCriteria, Metric, NumericRange};
use teleindex_catalog::domain::types::ItemId;
use teleindex_catalog::engine::{EngineSettings, QueryEngine, SourceMode};
use teleindex_catalog::query::remote::RemoteQuery;
use teleindex_catalog::query::sort::SortMode;
use teleindex_catalog::source::errors::SourceError;
use teleindex_catalog::source::http::HttpCatalog;
use teleindex_catalog::source::memory::MemoryCatalog;
use teleindex_catalog::source::{CatalogDirectory, RemoteCatalog};

fn api(server: &MockServer) -> HttpCatalog {
    HttpCatalog::new(&format!("{}/api", server.uri())).unwrap()
}

#[tokio::test]
async fn fetch_page_sends_only_set_facets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/channels"))
        .and(query_param("q", "rust"))
        .and(query_param("min_subscribers", "10000"))
        .and(query_param("sort", "price"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "a", "name": "Rust Daily", "subscribers": 12000, "price_rub": 900}],
            "total": 25,
            "page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let criteria = FilterCriteria::channels()
        .search("rust")
        .with_range(Metric::Subscribers, NumericRange::at_least(10_000.0));
    let query = RemoteQuery::build(&criteria, SortMode::Price, 2, 24);

    let page = api(&server).fetch_page(&query).await.unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.page, 2);
    assert_eq!(page.items[0].price, Some(900.0));

    let requests = server.received_requests().await.unwrap();
    let url = &requests[0].url;
    assert!(url.query_pairs().all(|(key, _)| key != "category" && key != "max_price"));
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/channels"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = api(&server).fetch_page(&RemoteQuery::default()).await;
    assert!(matches!(result, Err(SourceError::Status(500))));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = api(&server).fetch_page(&RemoteQuery::default()).await;
    assert!(matches!(result, Err(SourceError::Decode(_))));
}

#[tokio::test]
async fn directory_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["News", "Tech"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/channels/top"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "name": "Top One", "subscribers": 900000}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/channels/known"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "known", "name": "Known"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/channels/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let catalog = api(&server);
    assert_eq!(catalog.categories().await.unwrap(), vec!["News", "Tech"]);

    let top = catalog.trending(3).await.unwrap();
    assert_eq!(top[0].id.as_str(), "t1");

    let known = catalog.item(&ItemId::new("known").unwrap()).await.unwrap();
    assert_eq!(known.map(|item| item.name), Some("Known".to_string()));
    let missing = catalog.item(&ItemId::new("missing").unwrap()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn engine_falls_back_when_api_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "total": 0,
            "page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let local = MemoryCatalog::from_json_str(
        r#"[{"id": "demo", "name": "Demo Channel", "subscribers": 100}]"#,
    )
    .unwrap();
    let mut engine = QueryEngine::new(api(&server), local, EngineSettings::default());

    let page = engine.refresh().await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(engine.mode(), SourceMode::Fallback);

    // Fallback is permanent: later queries never reach the API again.
    engine.set_sort(SortMode::Name);
    let page = engine.refresh().await.unwrap();
    assert_eq!(page.items[0].id.as_str(), "demo");
}
