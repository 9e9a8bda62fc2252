//! DTOs exposed by the catalog API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::item::CatalogItem;

/// Payload of `GET /api/channels`.
///
/// Clients only rely on `items`, `total` and `page`; `limit` and `has_more`
/// are informational.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChannelListResponse {
    /// Page of items after filtering and sorting.
    pub items: Vec<CatalogItem>,
    /// Number of items matching the filter across all pages.
    pub total: usize,
    /// Page that was actually served.
    pub page: usize,
    /// Page size used for this response.
    pub limit: usize,
    /// Whether items remain after this page.
    pub has_more: bool,
}

/// Payload of `GET /api/health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
