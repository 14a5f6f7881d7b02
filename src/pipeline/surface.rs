//! Host surface trait for interface-agnostic rendering
//!
//! The orchestrator never draws anything itself. Every visible change is
//! pushed through a [`Surface`] handed over at construction time.
//! - the CLI renders spinners and bars on the terminal
//! - tests record the calls and assert on their order

use crate::form::Validity;
use crate::result::{MetricRow, ResultCard};
use crate::types::{Stage, StageId, Trigger, View};
use async_trait::async_trait;

/// Surface trait
///
/// Implement this trait to display the form, the stage pipeline and the
/// result view.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Called when the visible view switches
    async fn on_view(&self, view: View);

    /// Called after a stage changed status or message
    async fn on_stage(&self, id: StageId, stage: &Stage);

    /// Called when the trigger control changes enablement or busy state
    async fn on_trigger(&self, trigger: Trigger);

    /// Called once per submission with the terminal result
    async fn on_result(&self, card: &ResultCard);

    /// Called when a metric row is inserted at zero width
    async fn on_metric_inserted(&self, index: usize, row: &MetricRow);

    /// Called when a metric row reaches its final width
    async fn on_metric_width(&self, index: usize, row: &MetricRow);

    /// Called after every field change with the recomputed gate
    ///
    /// Synchronous: the validity gate never suspends.
    fn on_validity(&self, validity: &Validity, trigger: Trigger);
}

/// No-op surface for headless use or when rendering isn't needed
pub struct NoopSurface;

#[async_trait]
impl Surface for NoopSurface {
    async fn on_view(&self, _view: View) {}
    async fn on_stage(&self, _id: StageId, _stage: &Stage) {}
    async fn on_trigger(&self, _trigger: Trigger) {}
    async fn on_result(&self, _card: &ResultCard) {}
    async fn on_metric_inserted(&self, _index: usize, _row: &MetricRow) {}
    async fn on_metric_width(&self, _index: usize, _row: &MetricRow) {}
    fn on_validity(&self, _validity: &Validity, _trigger: Trigger) {}
}
