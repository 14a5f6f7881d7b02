//! Mock application backend for testing

#![allow(dead_code)]

use async_trait::async_trait;
use loanflow::backend::ApplicationBackend;
use loanflow::error::{Error, Result};
use loanflow::form::ApplicationForm;
use loanflow::types::{BackendReply, DashboardData};
use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

/// Hand-written mock backend
///
/// Features:
/// - Queued replies, consumed one per submission
/// - Simulated latency (observable under a paused clock)
/// - Call tracking for verification
/// - Error injection for transport failures
pub struct MockBackend {
    replies: Mutex<VecDeque<BackendReply>>,
    dashboard: Mutex<Option<DashboardData>>,
    latency: Mutex<Duration>,
    // Call tracking
    submit_calls: Mutex<Vec<ApplicationForm>>,
    // Error injection
    error_on_submit: Mutex<Option<String>>,
}

impl MockBackend {
    /// Create a mock with no queued replies
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            dashboard: Mutex::new(None),
            latency: Mutex::new(Duration::ZERO),
            submit_calls: Mutex::new(Vec::new()),
            error_on_submit: Mutex::new(None),
        }
    }

    /// Create a mock that answers the first submission with `reply`
    pub fn replying(reply: BackendReply) -> Self {
        let mock = Self::new();
        mock.push_reply(reply);
        mock
    }

    /// Queue a reply for the next submission
    pub fn push_reply(&self, reply: BackendReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Set the dashboard response
    pub fn set_dashboard(&self, data: DashboardData) {
        *self.dashboard.lock().unwrap() = Some(data);
    }

    /// Delay every submission by `latency`
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    // === Error injection ===

    /// Make `submit` fail as if the connection was refused
    pub fn fail_submit(&self, msg: &str) {
        *self.error_on_submit.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// Forms received by `submit`, in call order
    pub fn get_submit_calls(&self) -> Vec<ApplicationForm> {
        self.submit_calls.lock().unwrap().clone()
    }

    /// Number of `submit` calls
    pub fn submit_count(&self) -> usize {
        self.submit_calls.lock().unwrap().len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApplicationBackend for MockBackend {
    async fn submit(&self, form: &ApplicationForm) -> Result<BackendReply> {
        self.submit_calls.lock().unwrap().push(form.clone());

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let injected = self.error_on_submit.lock().unwrap().clone();
        if let Some(msg) = injected {
            return Err(Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, msg)));
        }

        let next = self.replies.lock().unwrap().pop_front();
        next.ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "mock backend has no queued reply",
            ))
        })
    }

    async fn dashboard(&self) -> Result<DashboardData> {
        let data = self.dashboard.lock().unwrap().clone();
        data.ok_or_else(|| Error::Backend {
            status: 404,
            message: "no dashboard configured".into(),
        })
    }

    fn endpoint(&self) -> &str {
        "mock://backend/api/apply"
    }
}
