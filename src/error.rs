//! Error types for loanflow

use thiserror::Error;

/// Errors raised by the loanflow library
///
/// Failures that happen while a submission is in flight never surface here:
/// the orchestrator folds them into a terminal [`Outcome`](crate::types::Outcome).
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure (connection refused, DNS, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error, e.g. while reading an attachment
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend answered a non-submission request with a failure status
    #[error("backend returned {status}: {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Submit requested while the trigger control is disabled
    #[error("form is not ready to submit: {0}")]
    SubmitBlocked(String),
}

/// Result alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
