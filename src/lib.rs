//! loanflow - loan application submission pipeline
//!
//! Drives a three-stage pipeline (intake, validation, decision) in lockstep
//! with one asynchronous submission to an agentic lending backend, then
//! renders the outcome with its explainability metrics.
//!
//! The host (terminal, GUI, test harness) plugs in through
//! [`pipeline::Surface`]; the backend through [`backend::ApplicationBackend`].
//! [`submit::LoanDesk`] wires both together.

pub mod backend;
pub mod config;
pub mod error;
pub mod form;
pub mod pipeline;
pub mod result;
pub mod submit;
pub mod types;
