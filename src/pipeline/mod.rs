//! Stage pipeline
//!
//! Holds the visible status of the intake, validation and decision stages
//! and the [`Surface`] trait every visible change is pushed through.

mod surface;
mod tracker;

pub use surface::{NoopSurface, Surface};
pub use tracker::{StageMark, StageTracker};
