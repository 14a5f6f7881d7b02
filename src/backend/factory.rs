//! Backend factory
//!
//! Creates the application backend from resolved settings.

use crate::backend::{ApplicationBackend, HttpBackend};
use crate::config::Settings;
use crate::error::Result;
use tracing::debug;

/// Create an application backend from settings
pub fn create_backend(settings: &Settings) -> Result<Box<dyn ApplicationBackend>> {
    debug!(
        "using backend {} (from {:?})",
        settings.backend_url, settings.backend_source
    );
    Ok(Box::new(HttpBackend::new(
        &settings.backend_url,
        settings.timeout,
    )?))
}
