//! Response classification
//!
//! Split in two because the decision hold sits between the checks: the
//! validation screen runs as soon as the response is in, the decision runs
//! after the decision stage has been on screen for its minimum time.

use crate::types::{BackendReply, Outcome, OutcomeKind};

/// Stage marker the backend sets on validation failures
pub const VALIDATION_STAGE_MARKER: &str = "Validation Agent";

/// Prefix of the remarks shown for backend failures
pub const SYSTEM_ERROR_PREFIX: &str = "An internal error occurred: ";

/// Remarks shown when no response was received
pub const NETWORK_ERROR_REMARKS: &str = "Failed to connect to agentic backend.";

/// Remarks used when the payload carries none
pub const MISSING_REMARKS: &str = "No remarks provided.";

const MISSING_ERROR: &str = "unknown error";

/// Screen a reply for a validation failure
///
/// Returns the terminal outcome when the status is exactly 400 and the
/// payload names the validation stage, `None` when the pipeline continues.
pub fn screen(reply: &BackendReply) -> Option<Outcome> {
    let payload = &reply.payload;
    if reply.status != 400 || payload.stage.as_deref() != Some(VALIDATION_STAGE_MARKER) {
        return None;
    }

    Some(Outcome {
        kind: OutcomeKind::ValidationFailed,
        title: payload
            .status
            .clone()
            .unwrap_or_else(|| "Rejected".to_string()),
        remarks: remarks_or_placeholder(reply),
        metrics: None,
    })
}

/// Classify a reply that passed the validation screen
pub fn decide(reply: &BackendReply) -> Outcome {
    let payload = &reply.payload;

    if reply.status != 200 {
        let error = payload.error.as_deref().unwrap_or(MISSING_ERROR);
        return Outcome {
            kind: OutcomeKind::SystemError,
            title: "Error".to_string(),
            remarks: format!("{SYSTEM_ERROR_PREFIX}{error}"),
            metrics: None,
        };
    }

    let approved = matches!(payload.status.as_deref(), Some("Approved" | "Success"));
    let (kind, title) = if approved {
        (OutcomeKind::Approved, "Loan Approved")
    } else {
        (OutcomeKind::Rejected, "Loan Rejected")
    };

    Outcome {
        kind,
        title: title.to_string(),
        remarks: remarks_or_placeholder(reply),
        metrics: payload.metrics.clone(),
    }
}

/// Outcome for a submission that never got a response
pub fn network_failure() -> Outcome {
    Outcome {
        kind: OutcomeKind::NetworkError,
        title: "Error".to_string(),
        remarks: NETWORK_ERROR_REMARKS.to_string(),
        metrics: None,
    }
}

fn remarks_or_placeholder(reply: &BackendReply) -> String {
    reply
        .payload
        .remarks
        .clone()
        .unwrap_or_else(|| MISSING_REMARKS.to_string())
}
