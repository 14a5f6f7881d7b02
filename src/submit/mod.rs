//! Submission orchestration
//!
//! Drives one application through the three visible stages:
//! 1. Intake - fixed hold while the form is packaged
//! 2. Validation - the backend call, then a fixed hold before the screen
//! 3. Decision - fixed hold, then the final classification

mod classify;
mod desk;
mod pacing;

pub use classify::{
    decide, network_failure, screen, MISSING_REMARKS, NETWORK_ERROR_REMARKS, SYSTEM_ERROR_PREFIX,
    VALIDATION_STAGE_MARKER,
};
pub use desk::{LoanDesk, LoanDeskBuilder, SubmissionPhase};
pub use pacing::Pacing;
