//! Application backend
//!
//! The remote collaborator that evaluates applications. The orchestrator
//! only relies on the contract below; the decision logic lives server-side.

mod factory;
mod http;

pub use factory::create_backend;
pub use http::{decode_payload, HttpBackend, APPLY_PATH, DASHBOARD_PATH};

use crate::error::Result;
use crate::form::ApplicationForm;
use crate::types::{BackendReply, DashboardData};
use async_trait::async_trait;

/// Backend service trait
///
/// `submit` must return `Ok` whenever the server answered, whatever the
/// status code; `Err` means no response was received.
#[async_trait]
pub trait ApplicationBackend: Send + Sync {
    /// Send one application and return the raw decision reply
    async fn submit(&self, form: &ApplicationForm) -> Result<BackendReply>;

    /// Fetch processed-application statistics
    async fn dashboard(&self) -> Result<DashboardData>;

    /// Human-readable endpoint, for logs
    fn endpoint(&self) -> &str;
}
