use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::item::CatalogItem;
use crate::domain::types::TypeConstraintError;

/// Result ordering selected by the user.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Subscribers, descending.
    #[default]
    #[serde(rename = "popular")]
    Popularity,
    /// Creation (or last activity) time, descending.
    #[serde(rename = "new")]
    Newest,
    /// Name, ascending.
    #[serde(rename = "name")]
    Name,
    /// Price, descending.
    #[serde(rename = "price")]
    Price,
    /// Engagement rate, descending.
    #[serde(rename = "er")]
    EngagementRate,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Popularity,
        SortMode::Newest,
        SortMode::Name,
        SortMode::Price,
        SortMode::EngagementRate,
    ];

    /// Key used in query strings.
    pub const fn key(self) -> &'static str {
        match self {
            SortMode::Popularity => "popular",
            SortMode::Newest => "new",
            SortMode::Name => "name",
            SortMode::Price => "price",
            SortMode::EngagementRate => "er",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortMode {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.key() == key)
            .ok_or_else(|| TypeConstraintError::UnknownSortMode(key.to_string()))
    }
}

pub type Comparator = fn(&CatalogItem, &CatalogItem) -> Ordering;

/// Returns the total-order comparator for a sort mode.
///
/// Comparators are pure; combined with a stable sort, items that compare
/// equal keep their input order.
pub fn comparator(mode: SortMode) -> Comparator {
    match mode {
        SortMode::Popularity => by_popularity,
        SortMode::Newest => by_newest,
        SortMode::Name => by_name,
        SortMode::Price => by_price,
        SortMode::EngagementRate => by_engagement_rate,
    }
}

/// Stable in-place sort.
pub fn sort_items(items: &mut [CatalogItem], mode: SortMode) {
    items.sort_by(comparator(mode));
}

/// Descending order on present values; `None` sorts after every value.
fn desc_present<T, F>(a: Option<T>, b: Option<T>, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => cmp(&b, &a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-folded comparison, falling back to code points for a total order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn subscribers_desc(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    b.subscribers.unwrap_or(0).cmp(&a.subscribers.unwrap_or(0))
}

fn by_popularity(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    let count = |item: &CatalogItem| item.subscribers.filter(|n| *n > 0);
    desc_present(count(a), count(b), u64::cmp).then_with(|| compare_names(&a.name, &b.name))
}

fn by_newest(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    desc_present(a.freshness(), b.freshness(), Ord::cmp)
        .then_with(|| compare_names(&a.name, &b.name))
}

fn by_name(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    compare_names(&a.name, &b.name)
}

fn by_price(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    let price = |item: &CatalogItem| item.price.unwrap_or(0.0);
    price(b)
        .total_cmp(&price(a))
        .then_with(|| subscribers_desc(a, b))
}

fn by_engagement_rate(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    desc_present(a.engagement_rate, b.engagement_rate, f64::total_cmp)
        .then_with(|| subscribers_desc(a, b))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::types::ItemId;

    fn item(id: &str, name: &str) -> CatalogItem {
        CatalogItem::new(ItemId::new(id).unwrap(), name)
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn sort_keys_round_trip_through_from_str() {
        for mode in SortMode::ALL {
            assert_eq!(mode.key().parse::<SortMode>(), Ok(mode));
        }
        assert!("cheapest".parse::<SortMode>().is_err());
    }

    #[test]
    fn popularity_puts_missing_and_zero_last_then_name() {
        let mut items = vec![
            CatalogItem { subscribers: Some(0), ..item("zero", "A") },
            CatalogItem { subscribers: Some(10), ..item("b10", "B") },
            item("none", "C"),
            CatalogItem { subscribers: Some(10), ..item("a10", "a") },
            CatalogItem { subscribers: Some(500), ..item("big", "Z") },
        ];
        sort_items(&mut items, SortMode::Popularity);
        assert_eq!(ids(&items), vec!["big", "a10", "b10", "zero", "none"]);
    }

    #[test]
    fn newest_puts_undated_last() {
        let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap();
        let mut items = vec![
            item("undated", "A"),
            CatalogItem { created_at: Some(day(1)), ..item("old", "B") },
            CatalogItem { last_activity_at: Some(day(9)), ..item("active", "C") },
            CatalogItem { created_at: Some(day(5)), ..item("mid", "D") },
        ];
        sort_items(&mut items, SortMode::Newest);
        assert_eq!(ids(&items), vec!["active", "mid", "old", "undated"]);
    }

    #[test]
    fn price_treats_missing_as_zero_and_breaks_ties_by_subscribers() {
        let mut items = vec![
            CatalogItem { subscribers: Some(5), ..item("free", "A") },
            CatalogItem { price: Some(100.0), subscribers: Some(1), ..item("p100-small", "B") },
            CatalogItem { price: Some(100.0), subscribers: Some(9), ..item("p100-big", "C") },
            CatalogItem { price: Some(0.0), subscribers: Some(50), ..item("zero", "D") },
        ];
        sort_items(&mut items, SortMode::Price);
        assert_eq!(ids(&items), vec!["p100-big", "p100-small", "zero", "free"]);
    }

    #[test]
    fn decoded_negative_zero_price_ties_with_missing_price() {
        let mut items: Vec<CatalogItem> = serde_json::from_str(
            r#"[
                {"id": "missing", "name": "A", "subscribers": 10},
                {"id": "negzero", "name": "B", "subscribers": 900, "price": -0.0}
            ]"#,
        )
        .unwrap();
        sort_items(&mut items, SortMode::Price);
        assert_eq!(ids(&items), vec!["negzero", "missing"]);
    }

    #[test]
    fn engagement_rate_ranks_missing_below_zero() {
        let mut items = vec![
            item("none", "A"),
            CatalogItem { engagement_rate: Some(0.0), ..item("zero", "B") },
            CatalogItem { engagement_rate: Some(7.5), ..item("high", "C") },
        ];
        sort_items(&mut items, SortMode::EngagementRate);
        assert_eq!(ids(&items), vec!["high", "zero", "none"]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_every_mode() {
        let twins = vec![item("first", "Same"), item("second", "Same"), item("third", "Same")];
        for mode in SortMode::ALL {
            let mut sorted = twins.clone();
            sort_items(&mut sorted, mode);
            assert_eq!(ids(&sorted), vec!["first", "second", "third"], "{mode}");
        }
    }

    #[test]
    fn name_ordering_ignores_case() {
        let mut items = vec![item("1", "beta"), item("2", "Alpha"), item("3", "alpha")];
        sort_items(&mut items, SortMode::Name);
        assert_eq!(ids(&items), vec!["2", "3", "1"]);
    }
}
