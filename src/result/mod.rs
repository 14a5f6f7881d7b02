//! Result view
//!
//! Turns a terminal [`Outcome`](crate::types::Outcome) into a title, remarks
//! and a panel of explainability metric bars.

mod metrics;
mod presenter;

pub use metrics::{MetricKind, Scale, Tier};
pub use presenter::{MetricRow, ResultCard, ResultPresenter};
