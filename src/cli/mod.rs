//! CLI commands
//!
//! Command implementations for the `loanflow` binary.

mod apply;
mod dashboard;
mod style;
mod surface;

pub use apply::{run_apply, ApplyArgs};
pub use dashboard::run_dashboard;
