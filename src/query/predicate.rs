//! Compiles [`FilterCriteria`] into a predicate over catalog items.
//!
//! The compiled clause list is the single source of truth for result
//! membership: local filtering evaluates it directly and remote query
//! parameters are derived from it (see [`crate::query::remote`]).

use crate::domain::criteria::{FilterCriteria, KindFacets, Metric, NumericRange};
use crate::domain::item::{CatalogItem, LinkStatus, ModerationStatus};

/// Exact-match select facet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectField {
    Category,
    Language,
    Country,
    City,
    SocialNetwork,
    Gender,
}

impl SelectField {
    pub fn value(self, item: &CatalogItem) -> Option<&str> {
        match self {
            SelectField::Category => item.category.as_deref(),
            SelectField::Language => item.language.as_deref(),
            SelectField::Country => item.country.as_deref(),
            SelectField::City => item.city.as_deref(),
            SelectField::SocialNetwork => item.social_network.as_deref(),
            SelectField::Gender => item.gender.as_deref(),
        }
    }
}

/// Boolean flag facet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flag {
    Featured,
    Alive,
    Verified,
}

/// One constraint of a compiled predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    /// Case-insensitive substring over name, both descriptions and tags.
    Text { raw: String, needle: String },
    Equals(SelectField, String),
    Range(Metric, NumericRange),
    Flag(Flag),
    Status(ModerationStatus),
}

impl Clause {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Clause::Text { needle, .. } => text_matches(item, needle),
            Clause::Equals(field, expected) => field.value(item) == Some(expected.as_str()),
            Clause::Range(metric, range) => range.contains(metric.value(item)),
            Clause::Flag(Flag::Featured) => item.is_featured,
            Clause::Flag(Flag::Alive) => item.link_status == LinkStatus::Alive,
            Clause::Flag(Flag::Verified) => item.flags.verified,
            Clause::Status(status) => item.status == *status,
        }
    }
}

fn text_matches(item: &CatalogItem, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&item.name)
        || item.description.as_deref().is_some_and(contains)
        || item.seo_description.as_deref().is_some_and(contains)
        || item.tags.iter().any(|tag| contains(tag))
}

/// AND-composition of clauses. No clauses means "match everything".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn compile(criteria: &FilterCriteria) -> Self {
        let mut clauses = Vec::new();

        if let Some(query) = &criteria.query {
            clauses.push(Clause::Text {
                raw: query.clone(),
                needle: query.to_lowercase(),
            });
        }

        let selects = [
            (SelectField::Category, &criteria.category),
            (SelectField::Language, &criteria.language),
            (SelectField::Country, &criteria.country),
            (SelectField::City, &criteria.city),
        ];
        for (field, value) in selects {
            if let Some(value) = value {
                clauses.push(Clause::Equals(field, value.clone()));
            }
        }

        for metric in Metric::ALL {
            let range = criteria.range(metric);
            if !range.is_unbounded() {
                clauses.push(Clause::Range(metric, range));
            }
        }

        if criteria.only_featured {
            clauses.push(Clause::Flag(Flag::Featured));
        }

        if let Some(status) = criteria.status {
            clauses.push(Clause::Status(status));
        }

        match &criteria.kind {
            KindFacets::Channel { only_alive } => {
                if *only_alive {
                    clauses.push(Clause::Flag(Flag::Alive));
                }
            }
            KindFacets::Creator {
                only_verified,
                social_network,
                gender,
            } => {
                if let Some(network) = social_network {
                    clauses.push(Clause::Equals(SelectField::SocialNetwork, network.clone()));
                }
                if let Some(gender) = gender {
                    clauses.push(Clause::Equals(SelectField::Gender, gender.clone()));
                }
                if *only_verified {
                    clauses.push(Clause::Flag(Flag::Verified));
                }
            }
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True when the predicate accepts every item.
    pub fn is_trivial(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.clauses.iter().all(|clause| clause.matches(item))
    }

}

/// Shorthand for [`Predicate::compile`].
pub fn compile(criteria: &FilterCriteria) -> Predicate {
    Predicate::compile(criteria)
}
