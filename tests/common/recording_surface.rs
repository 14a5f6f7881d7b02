//! Surface that records every call for ordering assertions

#![allow(dead_code)]

use async_trait::async_trait;
use loanflow::form::Validity;
use loanflow::pipeline::Surface;
use loanflow::result::{MetricRow, ResultCard};
use loanflow::types::{OutcomeKind, Stage, StageId, StageStatus, Trigger, View};
use std::sync::Mutex;
use tokio::time::Instant;

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    View(View),
    Stage(StageId, StageStatus, String),
    Trigger(Trigger),
    Result(OutcomeKind, String, bool),
    MetricInserted(usize, String, f64),
    MetricWidth(usize, String, f64),
    Validity(bool, Trigger),
}

/// Records surface calls with the (possibly paused) clock reading
pub struct RecordingSurface {
    started: Instant,
    events: Mutex<Vec<(Instant, Event)>>,
}

impl RecordingSurface {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            events: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push((Instant::now(), event));
    }

    /// All events in call order
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Stage events only, as `(id, status)`
    pub fn stage_transitions(&self) -> Vec<(StageId, StageStatus)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Stage(id, status, _) => Some((id, status)),
                _ => None,
            })
            .collect()
    }

    /// Time since creation at which the first event matching `pred` happened
    pub fn elapsed_at(&self, pred: impl Fn(&Event) -> bool) -> Option<std::time::Duration> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|(_, e)| pred(e))
            .map(|(at, _)| at.duration_since(self.started))
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    async fn on_view(&self, view: View) {
        self.record(Event::View(view));
    }

    async fn on_stage(&self, id: StageId, stage: &Stage) {
        self.record(Event::Stage(id, stage.status, stage.message.clone()));
    }

    async fn on_trigger(&self, trigger: Trigger) {
        self.record(Event::Trigger(trigger));
    }

    async fn on_result(&self, card: &ResultCard) {
        self.record(Event::Result(
            card.kind,
            card.title.clone(),
            card.metrics_visible,
        ));
    }

    async fn on_metric_inserted(&self, index: usize, row: &MetricRow) {
        self.record(Event::MetricInserted(index, row.key.clone(), row.width));
    }

    async fn on_metric_width(&self, index: usize, row: &MetricRow) {
        self.record(Event::MetricWidth(index, row.key.clone(), row.width));
    }

    fn on_validity(&self, validity: &Validity, trigger: Trigger) {
        self.record(Event::Validity(validity.is_valid(), trigger));
    }
}
