//! Fixed visual delays
//!
//! Each hold is an unconditional wait that keeps a stage on screen for a
//! minimum time, whatever the backend latency.

use std::time::Duration;

/// Minimum hold times of the submission pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Intake stage hold before the request is sent
    pub intake: Duration,
    /// Validation stage hold after the response arrives
    pub validation: Duration,
    /// Decision stage hold before the final classification
    pub decision: Duration,
    /// Delay between classification and the result view
    pub reveal: Duration,
    /// Delay between inserting metric rows and animating them
    pub bar_animation: Duration,
}

impl Pacing {
    /// Hold times used by the interactive form
    pub const STANDARD: Self = Self {
        intake: Duration::from_millis(1500),
        validation: Duration::from_millis(1500),
        decision: Duration::from_millis(2000),
        reveal: Duration::from_millis(800),
        bar_animation: Duration::from_millis(100),
    };

    /// No holds at all, for scripting and tests
    pub const INSTANT: Self = Self {
        intake: Duration::ZERO,
        validation: Duration::ZERO,
        decision: Duration::ZERO,
        reveal: Duration::ZERO,
        bar_animation: Duration::ZERO,
    };

    /// Sum of the holds on the longest path through the pipeline
    pub const fn total(&self) -> Duration {
        self.intake
            .saturating_add(self.validation)
            .saturating_add(self.decision)
            .saturating_add(self.reveal)
            .saturating_add(self.bar_animation)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Suspend for a fixed hold
pub(crate) async fn hold(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
