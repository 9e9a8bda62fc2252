//! Catalog query engine for a directory of Telegram channels and creators.
//!
//! The `data` feature carries the engine itself: filter criteria, the
//! predicate compiler, sorting, pagination, the remote/local query engine
//! and the injected client-side store. `client` adds the HTTP source and
//! the `catalog_query` tool; `server` adds an actix-web service answering
//! the same paged API from a JSON dataset.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::source::memory::MemoryCatalog;

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod engine;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod query;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "data")]
pub mod source;
#[cfg(feature = "data")]
pub mod store;

#[cfg(feature = "server")]
fn cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let catalog = MemoryCatalog::from_path(&server_config.dataset_path)
        .map_err(|e| std::io::Error::other(format!("Failed to load dataset: {e}")))?
        .with_default_categories(server_config.categories.clone());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving {} catalog items on {}:{}",
        catalog.len(),
        bind_address.0,
        bind_address.1
    );

    let catalog = web::Data::new(catalog);
    let config_data = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&config_data.cors_origins))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(web::scope("/api").configure(routes::api::configure))
            .app_data(catalog.clone())
            .app_data(config_data.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
