//! Strongly-typed value objects used by catalog entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, finite
//! non-negative metrics) so that once a value reaches the engine it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Metric was negative, NaN or infinite.
    #[error("metric must be a finite non-negative number")]
    InvalidMetric,
    /// Sort key is not one of the supported modes.
    #[error("unknown sort mode: {0}")]
    UnknownSortMode(String),
    /// Link status string is not recognised.
    #[error("unknown link status: {0}")]
    UnknownLinkStatus(String),
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(ItemId, "Opaque identifier of a catalog item.");

/// Validates a metric reading, rejecting NaN, infinities and negatives.
///
/// `-0.0` is normalised to `0.0` so it orders equal to an explicit zero.
pub fn checked_metric(value: f64) -> Result<f64, TypeConstraintError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value + 0.0)
    } else {
        Err(TypeConstraintError::InvalidMetric)
    }
}

/// Serde helper reading an optional non-negative metric.
///
/// Readings that violate [`checked_metric`] are dropped to `None` instead of
/// failing the whole payload, so one bad row never hides a result page.
pub(crate) fn lenient_metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| checked_metric(value).ok()))
}

/// Serde helper reading an optional whole, non-negative count.
///
/// Negative, fractional or non-finite readings become `None`, the same as
/// [`lenient_metric`]. `1200.0` is accepted as `1200`.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| checked_metric(value).ok())
        .filter(|value| value.fract() == 0.0 && *value <= u64::MAX as f64)
        .map(|value| value as u64))
}

/// Serde helper reading an optional finite number that may be negative.
pub(crate) fn finite_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|value| value.is_finite()))
}
