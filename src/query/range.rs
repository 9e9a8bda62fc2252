//! Lenient parsing of free-text numeric bounds.
//!
//! Range inputs are typed by hand and re-parsed on every keystroke, so
//! anything that does not read as a number is "no bound" rather than an error.

use crate::domain::criteria::{Metric, NumericRange};

/// How a raw bound string is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundKind {
    /// Whole-number metrics. Digit-group separators (spaces, `_`, `'`, `,`)
    /// are ignored; fractional input is kept as typed, never rounded.
    Integer,
    /// Fractional metrics. A single `,` is read as the decimal separator.
    Decimal,
}

impl BoundKind {
    pub const fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Subscribers | Metric::Price => BoundKind::Integer,
            Metric::EngagementRate => BoundKind::Decimal,
        }
    }
}

/// Parses one bound. Absent, blank or non-numeric input yields `None`.
pub fn parse_bound(raw: Option<&str>, kind: BoundKind) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized: String = match kind {
        BoundKind::Integer => trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '\u{a0}' | '_' | '\'' | ','))
            .collect(),
        BoundKind::Decimal => trimmed.replacen(',', ".", 1),
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a `min`/`max` pair. Each side is independent; a lone bound is
/// open-ended on the other side.
pub fn parse_range(min: Option<&str>, max: Option<&str>, kind: BoundKind) -> NumericRange {
    NumericRange::new(parse_bound(min, kind), parse_bound(max, kind))
}

/// Parses the bounds for a metric using the metric's own [`BoundKind`].
pub fn parse_metric_range(metric: Metric, min: Option<&str>, max: Option<&str>) -> NumericRange {
    parse_range(min, max, BoundKind::for_metric(metric))
}
