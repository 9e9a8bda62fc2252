use serde::Deserialize;
use validator::Validate;

use crate::query::remote::RemoteQuery;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Upper bound on the trending list length.
pub const MAX_TRENDING_LIMIT: usize = 50;

/// Paging parameters of `GET /api/channels`, validated before querying.
#[derive(Debug, Validate)]
pub struct PagingForm {
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = MAX_PAGE_LIMIT))]
    pub limit: usize,
}

impl PagingForm {
    pub fn from_query(query: &RemoteQuery, default_limit: usize) -> Self {
        Self {
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(default_limit),
        }
    }
}

/// Query parameters of `GET /api/channels/top`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TrendingForm {
    #[validate(range(min = 1, max = MAX_TRENDING_LIMIT))]
    pub limit: Option<usize>,
}
