use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;

use crate::dto::api::HealthResponse;
use crate::forms::catalog::TrendingForm;
use crate::models::config::ServerConfig;
use crate::query::remote::RemoteQuery;
use crate::routes::service_error_response;
use crate::services;
use crate::source::memory::MemoryCatalog;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        time: Utc::now().to_rfc3339(),
    })
}

#[get("/categories")]
pub async fn categories(catalog: web::Data<MemoryCatalog>) -> impl Responder {
    match services::catalog::list_categories(catalog.get_ref()).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => service_error_response(&e),
    }
}

#[get("/channels")]
pub async fn channels(
    params: web::Query<RemoteQuery>,
    catalog: web::Data<MemoryCatalog>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match services::catalog::list_channels(
        catalog.get_ref(),
        params.into_inner(),
        server_config.page_size,
    )
    .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => service_error_response(&e),
    }
}

#[get("/channels/top")]
pub async fn top_channels(
    params: web::Query<TrendingForm>,
    catalog: web::Data<MemoryCatalog>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match services::catalog::top_channels(
        catalog.get_ref(),
        params.into_inner(),
        server_config.trending_limit,
    )
    .await
    {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => service_error_response(&e),
    }
}

#[get("/channels/{id}")]
pub async fn channel_detail(
    path: web::Path<String>,
    catalog: web::Data<MemoryCatalog>,
) -> impl Responder {
    match services::catalog::channel_detail(catalog.get_ref(), &path).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => service_error_response(&e),
    }
}

/// Registers the catalog endpoints; `/channels/top` precedes `/channels/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(categories)
        .service(channels)
        .service(top_channels)
        .service(channel_detail);
}
