//! User-selected facets of a catalog query.
//!
//! A [`FilterCriteria`] value is never edited in place by the engine: every
//! facet change produces a new value through the consuming builder methods
//! below, and the engine swaps it in wholesale.

use serde::{Deserialize, Serialize};

use crate::domain::item::{CatalogItem, ModerationStatus};

/// Numeric metric that can be constrained by a range facet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Subscribers,
    Price,
    EngagementRate,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Subscribers, Metric::Price, Metric::EngagementRate];

    /// Reads the metric from an item.
    pub fn value(self, item: &CatalogItem) -> Option<f64> {
        match self {
            // Subscriber counts stay far below 2^53, so the conversion is exact.
            Metric::Subscribers => item.subscribers.map(|count| count as f64),
            Metric::Price => item.price,
            Metric::EngagementRate => item.engagement_rate,
        }
    }

}

/// Inclusive numeric interval; either end may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub const UNBOUNDED: NumericRange = NumericRange {
        min: None,
        max: None,
    };

    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub const fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    pub const fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Checks a metric reading against the configured bounds.
    ///
    /// A missing reading fails as soon as any bound is set.
    pub fn contains(&self, value: Option<f64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Facets that only exist for one kind of catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindFacets {
    Channel {
        only_alive: bool,
    },
    Creator {
        only_verified: bool,
        social_network: Option<String>,
        gender: Option<String>,
    },
}

impl Default for KindFacets {
    fn default() -> Self {
        KindFacets::Channel { only_alive: false }
    }
}

impl KindFacets {
    pub const fn creator() -> Self {
        KindFacets::Creator {
            only_verified: false,
            social_network: None,
            gender: None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            KindFacets::Channel { only_alive } => !only_alive,
            KindFacets::Creator {
                only_verified,
                social_network,
                gender,
            } => !only_verified && social_network.is_none() && gender.is_none(),
        }
    }
}

/// Full set of active facets. The default value matches every item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub subscribers: NumericRange,
    pub price: NumericRange,
    pub engagement_rate: NumericRange,
    pub only_featured: bool,
    /// Moderation state to require; `None` accepts every state.
    #[serde(default)]
    pub status: Option<ModerationStatus>,
    pub kind: KindFacets,
}

/// Trims a select or search value, collapsing blanks to "not set".
fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl FilterCriteria {
    /// Empty criteria for the channel catalog.
    pub fn channels() -> Self {
        Self::default()
    }

    /// Empty criteria for the creators catalog.
    pub fn creators() -> Self {
        Self {
            kind: KindFacets::creator(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.category.is_none()
            && self.language.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && Metric::ALL.iter().all(|m| self.range(*m).is_unbounded())
            && !self.only_featured
            && self.status.is_none()
            && self.kind.is_empty()
    }

    pub fn range(&self, metric: Metric) -> NumericRange {
        match metric {
            Metric::Subscribers => self.subscribers,
            Metric::Price => self.price,
            Metric::EngagementRate => self.engagement_rate,
        }
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.query = non_blank(query);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(category);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = non_blank(language);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = non_blank(country);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = non_blank(city);
        self
    }

    pub fn with_range(mut self, metric: Metric, range: NumericRange) -> Self {
        match metric {
            Metric::Subscribers => self.subscribers = range,
            Metric::Price => self.price = range,
            Metric::EngagementRate => self.engagement_rate = range,
        }
        self
    }

    pub fn only_featured(mut self, enabled: bool) -> Self {
        self.only_featured = enabled;
        self
    }

    pub fn status(mut self, status: ModerationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requires a live link. Switches the criteria to the channel kind.
    pub fn only_alive(mut self, enabled: bool) -> Self {
        self.kind = KindFacets::Channel {
            only_alive: enabled,
        };
        self
    }

    /// Requires a verified profile. Switches the criteria to the creator kind.
    pub fn only_verified(mut self, enabled: bool) -> Self {
        if let KindFacets::Creator { only_verified, .. } = &mut self.kind {
            *only_verified = enabled;
        } else {
            self.kind = KindFacets::Creator {
                only_verified: enabled,
                social_network: None,
                gender: None,
            };
        }
        self
    }

    /// Restricts creators to one social network.
    pub fn social_network(mut self, network: impl Into<String>) -> Self {
        let network = non_blank(network);
        if let KindFacets::Creator { social_network, .. } = &mut self.kind {
            *social_network = network;
        } else {
            self.kind = KindFacets::Creator {
                only_verified: false,
                social_network: network,
                gender: None,
            };
        }
        self
    }

    /// Restricts creators to one gender value.
    pub fn gender(mut self, value: impl Into<String>) -> Self {
        let value = non_blank(value);
        if let KindFacets::Creator { gender, .. } = &mut self.kind {
            *gender = value;
        } else {
            self.kind = KindFacets::Creator {
                only_verified: false,
                social_network: None,
                gender: value,
            };
        }
        self
    }
}
