//! Core types for loanflow

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// One of the three pipeline stages, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    /// Data ingestion and structuring
    Intake,
    /// Document and rule checks
    Validation,
    /// Final decision
    Decision,
}

impl StageId {
    /// All stages from first to last
    pub const ALL: [Self; 3] = [Self::Intake, Self::Validation, Self::Decision];

    /// Position in the pipeline (0-based)
    pub const fn index(self) -> usize {
        match self {
            Self::Intake => 0,
            Self::Validation => 1,
            Self::Decision => 2,
        }
    }

    /// Message shown while the stage is pending
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Intake => "Awaiting data ingestion...",
            Self::Validation => "Pending document & rule checks...",
            Self::Decision => "Pending final review...",
        }
    }

    /// Heading shown next to the stage
    pub const fn title(self) -> &'static str {
        match self {
            Self::Intake => "Intake Agent",
            Self::Validation => "Validation Agent",
            Self::Decision => "Decision Agent",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intake => write!(f, "intake"),
            Self::Validation => write!(f, "validation"),
            Self::Decision => write!(f, "decision"),
        }
    }
}

/// Status flag of a stage; exactly one holds at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Rest state, restored only by a full reset
    #[default]
    Pending,
    /// Currently running
    Active,
    /// Finished successfully
    Completed,
    /// Finished with a failure
    Error,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Visible state of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    /// Current status flag
    pub status: StageStatus,
    /// Human-readable status text
    pub message: String,
}

impl Stage {
    /// A stage in its initial configuration
    pub fn pending(id: StageId) -> Self {
        Self {
            status: StageStatus::Pending,
            message: id.placeholder().to_string(),
        }
    }
}

/// The three mutually exclusive top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Application form
    Form,
    /// Stage pipeline
    Pipeline,
    /// Terminal outcome
    Result,
}

/// Label shown on the trigger control when idle
pub const TRIGGER_LABEL: &str = "Submit Application";

/// State of the submit trigger control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigger {
    /// Whether the control accepts a submit
    pub enabled: bool,
    /// Whether the busy indicator replaces the label
    pub busy: bool,
}

impl Trigger {
    /// Idle control with its default label
    pub const fn idle(enabled: bool) -> Self {
        Self {
            enabled,
            busy: false,
        }
    }

    /// Disabled control showing the busy indicator
    pub const fn busy() -> Self {
        Self {
            enabled: false,
            busy: true,
        }
    }

    /// Label text, `None` while the busy indicator is shown
    pub const fn label(&self) -> Option<&'static str> {
        if self.busy { None } else { Some(TRIGGER_LABEL) }
    }
}

/// Terminal classification of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    /// Decision stage approved the application
    Approved,
    /// Decision stage rejected the application
    Rejected,
    /// Validation stage rejected the submitted content
    ValidationFailed,
    /// Backend answered with a failure status
    SystemError,
    /// No response was received
    NetworkError,
}

impl OutcomeKind {
    /// Presentation tag for the result view
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Approved => "success",
            Self::Rejected | Self::ValidationFailed | Self::SystemError | Self::NetworkError => {
                "rejected"
            }
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::ValidationFailed => write!(f, "validation failed"),
            Self::SystemError => write!(f, "system error"),
            Self::NetworkError => write!(f, "network error"),
        }
    }
}

/// Terminal outcome of one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Classification
    pub kind: OutcomeKind,
    /// Result heading
    pub title: String,
    /// Result body text
    pub remarks: String,
    /// Explainability metrics, if the decision carried any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricSet>,
}

/// Ordered mapping of metric key to value
///
/// Keeps the key order of the response payload, which is the order metrics
/// are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet(IndexMap<String, f64>);

impl MetricSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a metric; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Look up a metric value
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of metrics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no metrics
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// JSON body returned by the application endpoint
///
/// Every field is optional; which ones are present depends on the branch
/// the backend took. Fields are decoded independently: a field of the
/// wrong type reads as absent and leaves the others intact.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DecisionPayload {
    /// Decision label, e.g. "Approved", "Success", "Rejected"
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    /// Explanation shown to the applicant
    #[serde(default, deserialize_with = "lenient_text")]
    pub remarks: Option<String>,
    /// Stage that produced the response, e.g. "Validation Agent"
    #[serde(default, deserialize_with = "lenient_text")]
    pub stage: Option<String>,
    /// Error text on failure responses
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
    /// Explainability metrics; non-numeric entries are dropped
    #[serde(default, deserialize_with = "lenient_metrics")]
    pub metrics: Option<MetricSet>,
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => {
            warn!("ignoring payload field that is not text: {other}");
            Ok(None)
        }
    }
}

/// Metrics as sent, before dropping entries that are not numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetrics {
    Map(IndexMap<String, Value>),
    Other(Value),
}

fn lenient_metrics<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<MetricSet>, D::Error> {
    let entries = match RawMetrics::deserialize(deserializer)? {
        RawMetrics::Map(entries) => entries,
        RawMetrics::Other(Value::Null) => return Ok(None),
        RawMetrics::Other(other) => {
            warn!("ignoring metrics that are not an object: {other}");
            return Ok(None);
        }
    };

    let metrics = entries
        .into_iter()
        .filter_map(|(key, value)| match value.as_f64() {
            Some(number) => Some((key, number)),
            None => {
                warn!("ignoring metric {key}: {value} is not a number");
                None
            }
        })
        .collect();
    Ok(Some(metrics))
}

/// Response to a submission: HTTP status plus decoded payload
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    /// HTTP status code
    pub status: u16,
    /// Decoded body
    pub payload: DecisionPayload,
}

/// Aggregate counters from the dashboard endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Approved applications
    pub approved: u64,
    /// Rejected applications
    pub denied: u64,
    /// Applications sent to manual review
    pub review: u64,
    /// Applications waiting to be processed
    pub queue: u64,
    /// All processed applications
    pub total_processed: u64,
}

/// One processed application as listed on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationRecord {
    /// Applicant initials
    pub initials: String,
    /// Applicant full name
    pub name: String,
    /// Application identifier
    pub id: String,
    /// Formatted loan amount
    pub amt: String,
    /// Loan product type
    #[serde(rename = "type")]
    pub kind: String,
    /// Formatted debt-to-income ratio
    pub dti: String,
    /// Credit score
    pub score: u32,
    /// Decision label (APPROVED, REJECTED, REVIEW)
    pub decision: String,
    /// Offered rate or "N/A"
    pub rate: String,
    /// One-line description
    pub desc: String,
    /// Display label
    pub label: String,
    /// Processing time
    pub created_at: String,
}

/// Dashboard endpoint body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Counters
    pub stats: DashboardStats,
    /// Most recent first
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
}
