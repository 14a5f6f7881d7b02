//! Result presenter
//!
//! Renders a terminal outcome. Metric rows go out in two phases: every row
//! is inserted at zero width first, then moved to its final width after a
//! short hold, so the host can animate the transition.

use crate::pipeline::Surface;
use crate::result::{MetricKind, Tier};
use crate::types::{Outcome, OutcomeKind};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One rendered metric bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    /// Raw metric key
    pub key: String,
    /// Display label (raw key for unknown metrics)
    pub label: String,
    /// Display percent
    pub percent: f64,
    /// Severity tier derived from the percent
    pub tier: Tier,
    /// Current indicator width in percent of the track
    pub width: f64,
}

impl MetricRow {
    /// Build a zero-width row from a raw metric
    pub fn new(key: &str, value: f64) -> Self {
        let kind = MetricKind::of(key);
        let percent = kind.percent(value);
        Self {
            key: key.to_string(),
            label: kind.label(key).to_string(),
            percent,
            tier: Tier::of(percent),
            width: 0.0,
        }
    }

    /// Width the indicator animates to, kept inside the track
    pub fn target_width(&self) -> f64 {
        self.percent.clamp(0.0, 100.0)
    }
}

/// Contents of the result view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    /// Outcome classification, drives presentation
    pub kind: OutcomeKind,
    /// Heading, verbatim
    pub title: String,
    /// Body text, verbatim
    pub remarks: String,
    /// Whether the metrics panel is shown
    pub metrics_visible: bool,
    /// Metric rows in payload order
    pub rows: Vec<MetricRow>,
}

/// Renders outcomes into the result view
pub struct ResultPresenter {
    card: Option<ResultCard>,
    surface: Arc<dyn Surface>,
    animation_delay: Duration,
}

impl ResultPresenter {
    /// Create a presenter with an empty result view
    pub fn new(surface: Arc<dyn Surface>, animation_delay: Duration) -> Self {
        Self {
            card: None,
            surface,
            animation_delay,
        }
    }

    /// Render an outcome
    pub async fn present(&mut self, outcome: &Outcome) {
        let rows: Vec<MetricRow> = outcome
            .metrics
            .iter()
            .flat_map(|metrics| metrics.iter())
            .map(|(key, value)| MetricRow::new(key, value))
            .collect();

        let card = self.card.insert(ResultCard {
            kind: outcome.kind,
            title: outcome.title.clone(),
            remarks: outcome.remarks.clone(),
            metrics_visible: !rows.is_empty(),
            rows,
        });

        debug!(
            "presenting {} result with {} metric rows",
            card.kind,
            card.rows.len()
        );
        self.surface.on_result(card).await;

        if card.rows.is_empty() {
            return;
        }

        for (index, row) in card.rows.iter().enumerate() {
            self.surface.on_metric_inserted(index, row).await;
        }

        tokio::time::sleep(self.animation_delay).await;

        for (index, row) in card.rows.iter_mut().enumerate() {
            row.width = row.target_width();
            self.surface.on_metric_width(index, row).await;
        }
    }

    /// Currently rendered result, if any
    pub const fn card(&self) -> Option<&ResultCard> {
        self.card.as_ref()
    }

    /// Empty the result view
    pub fn clear(&mut self) {
        self.card = None;
    }
}
