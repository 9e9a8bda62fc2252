use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ItemId, TypeConstraintError, finite_number, lenient_count, lenient_metric,
};

/// Result of the last liveness probe for a channel link.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Alive,
    Dead,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LinkStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Alive => "alive",
            LinkStatus::Dead => "dead",
            LinkStatus::Unknown => "unknown",
        }
    }
}

impl Display for LinkStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alive" => Ok(LinkStatus::Alive),
            "dead" => Ok(LinkStatus::Dead),
            "unknown" => Ok(LinkStatus::Unknown),
            other => Err(TypeConstraintError::UnknownLinkStatus(other.to_string())),
        }
    }
}

/// Moderation state of a catalog entry. Only approved entries are public.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Draft,
    #[default]
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ModerationStatus {
    pub const fn is_public(self) -> bool {
        matches!(self, ModerationStatus::Approved)
    }
}

/// Moderation flags attached to creator profiles.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemFlags {
    #[serde(default)]
    pub verified: bool,
}

/// Read-only catalog entry as served by the directory API.
///
/// Numeric metrics are either a finite non-negative reading or `None`; a
/// reported zero stays `Some(0)` so it is never confused with "unknown".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "social")]
    pub social_network: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub subscribers: Option<u64>,
    #[serde(default, alias = "er", deserialize_with = "lenient_metric")]
    pub engagement_rate: Option<f64>,
    #[serde(default, alias = "price_rub", deserialize_with = "lenient_metric")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_metric")]
    pub cpm: Option<f64>,
    /// Thirty-day growth in percent; may be negative.
    #[serde(default, deserialize_with = "finite_number")]
    pub growth_30d: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub link_status: LinkStatus,
    /// Rows without a status predate moderation and count as approved.
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default)]
    pub flags: ItemFlags,
    #[serde(default, alias = "short_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogItem {
    /// Creates an item with only identity and name populated.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            language: None,
            country: None,
            city: None,
            social_network: None,
            gender: None,
            subscribers: None,
            engagement_rate: None,
            price: None,
            cpm: None,
            growth_30d: None,
            created_at: None,
            last_activity_at: None,
            is_featured: false,
            link_status: LinkStatus::Unknown,
            status: ModerationStatus::Approved,
            flags: ItemFlags::default(),
            description: None,
            seo_description: None,
            tags: Vec::new(),
        }
    }

    /// Timestamp used for "newest" ordering: creation time, else last activity.
    pub fn freshness(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.last_activity_at)
    }
}
