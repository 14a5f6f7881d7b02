//! Metric labels, percent conversion and severity tiers

use serde::Serialize;

/// How a metric value maps to a display percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Value is already a 0-100 percent
    Percent,
    /// Value is a 0-1 fraction
    Fraction,
}

/// What is known about a metric key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Key from the label table
    Known {
        /// Display label
        label: &'static str,
        /// Value convention
        scale: Scale,
    },
    /// Key outside the table, shown by its raw name as a fraction
    Unknown,
}

const KNOWN_METRICS: &[(&str, &str, Scale)] = &[
    ("confidence", "AI Confidence", Scale::Percent),
    ("dti_score", "Debt-to-Income Health", Scale::Fraction),
    ("credit_score", "Credit Strength", Scale::Fraction),
    ("employment_score", "Employment Stability", Scale::Fraction),
];

impl MetricKind {
    /// Classify a metric key
    pub fn of(key: &str) -> Self {
        KNOWN_METRICS
            .iter()
            .find(|(k, _, _)| *k == key)
            .map_or(Self::Unknown, |&(_, label, scale)| Self::Known { label, scale })
    }

    /// Display label, falling back to the raw key
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        match self {
            Self::Known { label, .. } => label,
            Self::Unknown => key,
        }
    }

    /// Display percent for a raw value
    pub fn percent(&self, value: f64) -> f64 {
        match self {
            Self::Known {
                scale: Scale::Percent,
                ..
            } => value,
            Self::Known {
                scale: Scale::Fraction,
                ..
            }
            | Self::Unknown => (value * 100.0).round(),
        }
    }
}

/// Severity tier selecting the bar color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Above 70%
    Positive,
    /// Above 40%
    Neutral,
    /// 40% or below
    Negative,
}

impl Tier {
    /// Tier for a display percent
    pub fn of(percent: f64) -> Self {
        if percent > 70.0 {
            Self::Positive
        } else if percent > 40.0 {
            Self::Neutral
        } else {
            Self::Negative
        }
    }
}
