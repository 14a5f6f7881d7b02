//! Stage tracker
//!
//! A dumb status store for the three pipeline stages. Ordering is the
//! orchestrator's job; the tracker applies whatever it is told.

use crate::pipeline::Surface;
use crate::types::{Stage, StageId, StageStatus};
use std::sync::Arc;
use tracing::debug;

/// Status a caller may set on a stage
///
/// There is no pending mark: pending is only restored by [`StageTracker::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMark {
    /// Stage is running
    Active,
    /// Stage finished successfully
    Completed,
    /// Stage finished with a failure
    Error,
}

impl From<StageMark> for StageStatus {
    fn from(mark: StageMark) -> Self {
        match mark {
            StageMark::Active => Self::Active,
            StageMark::Completed => Self::Completed,
            StageMark::Error => Self::Error,
        }
    }
}

/// Visible status of the intake, validation and decision stages
pub struct StageTracker {
    stages: [Stage; 3],
    surface: Arc<dyn Surface>,
}

impl StageTracker {
    /// Create a tracker with every stage pending
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            stages: StageId::ALL.map(Stage::pending),
            surface,
        }
    }

    /// Replace a stage's status flag, and its message when one is given
    pub async fn set_stage(&mut self, id: StageId, mark: StageMark, message: Option<&str>) {
        let stage = &mut self.stages[id.index()];
        stage.status = mark.into();
        if let Some(message) = message {
            stage.message = message.to_string();
        }

        debug!("stage {id} -> {}: {}", stage.status, stage.message);
        self.surface.on_stage(id, stage).await;
    }

    /// Current state of one stage
    pub fn stage(&self, id: StageId) -> &Stage {
        &self.stages[id.index()]
    }

    /// All stages in pipeline order
    pub const fn stages(&self) -> &[Stage; 3] {
        &self.stages
    }

    /// Restore every stage to pending with its placeholder message
    pub async fn reset(&mut self) {
        for id in StageId::ALL {
            self.stages[id.index()] = Stage::pending(id);
            self.surface.on_stage(id, &self.stages[id.index()]).await;
        }
    }
}
