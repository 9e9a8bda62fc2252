use validator::Validate;

use crate::domain::item::{CatalogItem, ModerationStatus};
use crate::domain::types::ItemId;
use crate::dto::api::ChannelListResponse;
use crate::forms::catalog::{PagingForm, TrendingForm};
use crate::query::remote::RemoteQuery;
use crate::services::{ServiceError, ServiceResult};
use crate::source::{CatalogDirectory, RemoteCatalog};

/// Answers one page of `GET /api/channels`.
///
/// Paging is validated first; `default_limit` applies when the caller sends
/// no `limit`. Without an explicit `status` only approved items are listed.
pub async fn list_channels<R>(
    catalog: &R,
    mut query: RemoteQuery,
    default_limit: usize,
) -> ServiceResult<ChannelListResponse>
where
    R: RemoteCatalog + ?Sized,
{
    let paging = PagingForm::from_query(&query, default_limit);
    paging.validate().map_err(|e| ServiceError::Form(e.to_string()))?;

    query.page = Some(paging.page);
    query.limit = Some(paging.limit);
    query.status.get_or_insert(ModerationStatus::Approved);

    let page = catalog.fetch_page(&query).await.map_err(|e| {
        log::error!("Failed to fetch catalog page: {e}");
        ServiceError::from(e)
    })?;

    let served = page.page.saturating_sub(1).saturating_mul(paging.limit);
    let has_more = served + page.items.len() < page.total;

    Ok(ChannelListResponse {
        items: page.items,
        total: page.total,
        page: page.page,
        limit: paging.limit,
        has_more,
    })
}

pub async fn list_categories<R>(catalog: &R) -> ServiceResult<Vec<String>>
where
    R: CatalogDirectory + ?Sized,
{
    catalog.categories().await.map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::from(e)
    })
}

/// Most popular items, at most `form.limit` (or `default_limit`) of them.
pub async fn top_channels<R>(
    catalog: &R,
    form: TrendingForm,
    default_limit: usize,
) -> ServiceResult<Vec<CatalogItem>>
where
    R: CatalogDirectory + ?Sized,
{
    form.validate().map_err(|e| ServiceError::Form(e.to_string()))?;

    catalog
        .trending(form.limit.unwrap_or(default_limit))
        .await
        .map_err(|e| {
            log::error!("Failed to list trending channels: {e}");
            ServiceError::from(e)
        })
}

pub async fn channel_detail<R>(catalog: &R, raw_id: &str) -> ServiceResult<CatalogItem>
where
    R: CatalogDirectory + ?Sized,
{
    let id = ItemId::new(raw_id)?;

    match catalog.item(&id).await {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load channel {id}: {e}");
            Err(ServiceError::from(e))
        }
    }
}
