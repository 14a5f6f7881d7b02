//! Test data factories for loanflow types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use loanflow::form::{ApplicationForm, Field};
use loanflow::types::{BackendReply, DecisionPayload, MetricSet};

/// Field values of a complete, valid application
pub const COMPLETE_VALUES: [(Field, &str); 9] = [
    (Field::FirstName, "Jane"),
    (Field::LastName, "Doe"),
    (Field::Email, "jane@example.com"),
    (Field::AnnualIncome, "150000"),
    (Field::LoanAmount, "10000"),
    (Field::CreditScore, "750"),
    (Field::EmploymentStatus, "2"),
    (Field::HousingStatus, "2"),
    (Field::LoanTerm, "12"),
];

/// A form that passes the validity gate
pub fn complete_form() -> ApplicationForm {
    let mut form = ApplicationForm::new();
    for (field, value) in COMPLETE_VALUES {
        form.set(field, value);
    }
    form
}

/// Build a reply from a status code and a JSON body
pub fn reply(status: u16, body: serde_json::Value) -> BackendReply {
    BackendReply {
        status,
        payload: serde_json::from_value(body).expect("test payload is a decision payload"),
    }
}

/// Approval with confidence and debt-to-income metrics
pub fn approved_reply() -> BackendReply {
    reply(
        200,
        serde_json::json!({
            "status": "Approved",
            "remarks": "Strong profile",
            "metrics": { "confidence": 92, "dti_score": 0.8 }
        }),
    )
}

/// Denial without metrics
pub fn denied_reply() -> BackendReply {
    reply(
        200,
        serde_json::json!({ "status": "Denied", "remarks": "Score below threshold" }),
    )
}

/// Early rejection from the validation agent
pub fn validation_reply() -> BackendReply {
    reply(
        400,
        serde_json::json!({
            "status": "Rejected",
            "stage": "Validation Agent",
            "remarks": "Income documentation unclear"
        }),
    )
}

/// Server-side failure
pub fn server_error_reply() -> BackendReply {
    reply(500, serde_json::json!({ "error": "model unavailable" }))
}

/// Reply with an empty payload
pub fn bare_reply(status: u16) -> BackendReply {
    BackendReply {
        status,
        payload: DecisionPayload::default(),
    }
}

/// Metric set from `(key, value)` pairs
pub fn metrics(pairs: &[(&str, f64)]) -> MetricSet {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}
