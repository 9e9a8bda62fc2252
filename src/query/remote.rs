//! Query-string contract of the paged catalog endpoint.
//!
//! The client builds a [`RemoteQuery`] from the compiled predicate; the
//! server parses it back into criteria. Only set facets are serialized.

use serde::{Deserialize, Serialize};

use crate::domain::criteria::{FilterCriteria, KindFacets, Metric};
use crate::domain::item::ModerationStatus;
use crate::query::predicate::{Clause, Flag, Predicate, SelectField};
use crate::query::range::parse_metric_range;
use crate::query::sort::SortMode;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_subscribers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_subscribers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_er: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_er: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_alive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ModerationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl RemoteQuery {
    /// Derives the query parameters for one page of results.
    pub fn build(criteria: &FilterCriteria, sort: SortMode, page: usize, limit: usize) -> Self {
        let mut query = Self::from_predicate(&Predicate::compile(criteria));
        query.sort = Some(sort);
        query.page = Some(page.max(1));
        query.limit = Some(limit);
        query
    }

    fn from_predicate(predicate: &Predicate) -> Self {
        let mut query = Self::default();
        for clause in predicate.clauses() {
            match clause {
                Clause::Text { raw, .. } => query.q = Some(raw.clone()),
                Clause::Equals(field, value) => {
                    let slot = match field {
                        SelectField::Category => &mut query.category,
                        SelectField::Language => &mut query.language,
                        SelectField::Country => &mut query.country,
                        SelectField::City => &mut query.city,
                        SelectField::SocialNetwork => &mut query.social,
                        SelectField::Gender => &mut query.gender,
                    };
                    *slot = Some(value.clone());
                }
                Clause::Range(metric, range) => {
                    let (min, max) = query.bounds_mut(*metric);
                    *min = range.min.map(format_bound);
                    *max = range.max.map(format_bound);
                }
                Clause::Flag(Flag::Featured) => query.only_featured = Some(true),
                Clause::Flag(Flag::Alive) => query.only_alive = Some(true),
                Clause::Flag(Flag::Verified) => query.only_verified = Some(true),
                Clause::Status(status) => query.status = Some(*status),
            }
        }
        query
    }

    fn bounds_mut(&mut self, metric: Metric) -> (&mut Option<String>, &mut Option<String>) {
        match metric {
            Metric::Subscribers => (&mut self.min_subscribers, &mut self.max_subscribers),
            Metric::Price => (&mut self.min_price, &mut self.max_price),
            Metric::EngagementRate => (&mut self.min_er, &mut self.max_er),
        }
    }

    fn bounds(&self, metric: Metric) -> (Option<&str>, Option<&str>) {
        match metric {
            Metric::Subscribers => (
                self.min_subscribers.as_deref(),
                self.max_subscribers.as_deref(),
            ),
            Metric::Price => (self.min_price.as_deref(), self.max_price.as_deref()),
            Metric::EngagementRate => (self.min_er.as_deref(), self.max_er.as_deref()),
        }
    }

    /// Reconstructs criteria from received parameters.
    ///
    /// Range strings go through the lenient range parser, so malformed bounds
    /// are dropped instead of rejecting the request. Creator-only parameters
    /// select the creator kind.
    pub fn criteria(&self) -> FilterCriteria {
        let is_creator =
            self.social.is_some() || self.gender.is_some() || self.only_verified.is_some();
        let kind = if is_creator {
            KindFacets::Creator {
                only_verified: self.only_verified.unwrap_or(false),
                social_network: None,
                gender: None,
            }
        } else {
            KindFacets::Channel {
                only_alive: self.only_alive.unwrap_or(false),
            }
        };

        let mut criteria = FilterCriteria {
            kind,
            only_featured: self.only_featured.unwrap_or(false),
            status: self.status,
            ..FilterCriteria::default()
        };
        criteria = criteria
            .search(self.q.clone().unwrap_or_default())
            .category(self.category.clone().unwrap_or_default())
            .language(self.language.clone().unwrap_or_default())
            .country(self.country.clone().unwrap_or_default())
            .city(self.city.clone().unwrap_or_default());
        if let Some(network) = &self.social {
            criteria = criteria.social_network(network.clone());
        }
        if let Some(gender) = &self.gender {
            criteria = criteria.gender(gender.clone());
        }

        for metric in Metric::ALL {
            let (min, max) = self.bounds(metric);
            criteria = criteria.with_range(metric, parse_metric_range(metric, min, max));
        }
        criteria
    }
}

/// Formats a bound without a trailing `.0` for whole numbers.
fn format_bound(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criteria::NumericRange;

    #[test]
    fn empty_criteria_only_carries_paging_and_sort() {
        let query = RemoteQuery::build(&FilterCriteria::default(), SortMode::Popularity, 1, 24);
        assert_eq!(
            query,
            RemoteQuery {
                sort: Some(SortMode::Popularity),
                page: Some(1),
                limit: Some(24),
                ..RemoteQuery::default()
            }
        );
    }

    #[test]
    fn set_facets_map_to_named_parameters() {
        let criteria = FilterCriteria::channels()
            .search("Crypto News")
            .category("Finance")
            .with_range(Metric::Subscribers, NumericRange::at_least(10_000.0))
            .with_range(Metric::EngagementRate, NumericRange::new(Some(1.5), Some(8.0)))
            .only_featured(true)
            .only_alive(true);

        let query = RemoteQuery::build(&criteria, SortMode::Price, 3, 24);

        assert_eq!(query.q.as_deref(), Some("Crypto News"));
        assert_eq!(query.category.as_deref(), Some("Finance"));
        assert_eq!(query.min_subscribers.as_deref(), Some("10000"));
        assert_eq!(query.max_subscribers, None);
        assert_eq!(query.min_er.as_deref(), Some("1.5"));
        assert_eq!(query.max_er.as_deref(), Some("8"));
        assert_eq!(query.only_featured, Some(true));
        assert_eq!(query.only_alive, Some(true));
        assert_eq!(query.only_verified, None);
        assert_eq!(query.sort, Some(SortMode::Price));
        assert_eq!(query.page, Some(3));
    }

    #[test]
    fn parsed_parameters_rebuild_equivalent_criteria() {
        let criteria = FilterCriteria::creators()
            .search("travel")
            .country("RU")
            .social_network("instagram")
            .with_range(Metric::Price, NumericRange::at_most(20_000.0))
            .only_verified(true)
            .status(ModerationStatus::Draft);

        let query = RemoteQuery::build(&criteria, SortMode::Name, 1, 12);

        assert_eq!(query.status, Some(ModerationStatus::Draft));
        assert_eq!(query.criteria(), criteria);
    }

    #[test]
    fn malformed_bounds_are_ignored_when_parsing() {
        let query = RemoteQuery {
            min_subscribers: Some("lots".into()),
            max_price: Some("5 000".into()),
            ..RemoteQuery::default()
        };

        let criteria = query.criteria();

        assert!(criteria.subscribers.is_unbounded());
        assert_eq!(criteria.price, NumericRange::at_most(5_000.0));
    }
}
