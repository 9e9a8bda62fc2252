//! Filtering, ordering and query-string derivation for catalog queries.

pub mod predicate;
pub mod range;
pub mod remote;
pub mod sort;

use crate::domain::criteria::FilterCriteria;
use crate::domain::item::CatalogItem;
use crate::pagination::{PageRequest, PageWindow, paginate};
use crate::query::predicate::Predicate;
use crate::query::sort::{SortMode, sort_items};

/// Items of one locally computed page plus the total match count.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalPage {
    pub items: Vec<CatalogItem>,
    pub total: usize,
    pub window: PageWindow,
}

/// Runs the local pipeline over a materialized collection.
///
/// Always filter, then sort, then paginate. Pure: the input is not touched.
pub fn run_local(
    items: &[CatalogItem],
    criteria: &FilterCriteria,
    sort: SortMode,
    request: PageRequest,
) -> LocalPage {
    let predicate = Predicate::compile(criteria);
    let mut matched: Vec<CatalogItem> = items
        .iter()
        .filter(|item| predicate.matches(item))
        .cloned()
        .collect();

    sort_items(&mut matched, sort);

    let window = paginate(matched.len(), request.page_size, request.page);
    LocalPage {
        items: window.slice(&matched),
        total: matched.len(),
        window,
    }
}
