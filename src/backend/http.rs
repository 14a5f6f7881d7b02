//! HTTP backend implementation

use crate::backend::ApplicationBackend;
use crate::error::{Error, Result};
use crate::form::ApplicationForm;
use crate::types::{BackendReply, DashboardData, DecisionPayload};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Path of the application endpoint, relative to the base URL
pub const APPLY_PATH: &str = "api/apply";

/// Path of the dashboard endpoint, relative to the base URL
pub const DASHBOARD_PATH: &str = "api/dashboard-data";

/// Backend service using reqwest
pub struct HttpBackend {
    client: Client,
    apply_url: Url,
    dashboard_url: Url,
}

impl HttpBackend {
    /// Create a backend rooted at `base`
    ///
    /// Without a timeout the client waits indefinitely for a response.
    pub fn new(base: &Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            apply_url: join(base, APPLY_PATH)?,
            dashboard_url: join(base, DASHBOARD_PATH)?,
        })
    }

    async fn multipart(form: &ApplicationForm) -> Result<Form> {
        let mut body = Form::new();
        for (name, value) in form.fields() {
            body = body.text(name, value.trim().to_string());
        }

        for (slot, path) in form.attachments() {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| slot.name().to_string());
            debug!("attaching {} ({} bytes) as {}", file_name, bytes.len(), slot.name());
            body = body.part(slot.name(), Part::bytes(bytes).file_name(file_name));
        }

        Ok(body)
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| Error::Config(format!("cannot build endpoint '{path}' from {base}: {e}")))
}

/// Decode a reply body
///
/// A body that is not a JSON object reads as empty. Inside an object, a field
/// of the wrong type is dropped on its own.
pub fn decode_payload(body: &str) -> DecisionPayload {
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!("backend reply is not a decision payload ({e}); classifying on status alone");
        DecisionPayload::default()
    })
}

#[async_trait]
impl ApplicationBackend for HttpBackend {
    async fn submit(&self, form: &ApplicationForm) -> Result<BackendReply> {
        let body = Self::multipart(form).await?;

        let response = self
            .client
            .post(self.apply_url.clone())
            .multipart(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("apply endpoint answered {status} with {} bytes", text.len());

        Ok(BackendReply {
            status,
            payload: decode_payload(&text),
        })
    }

    async fn dashboard(&self) -> Result<DashboardData> {
        let response = self.client.get(self.dashboard_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    message
                },
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn endpoint(&self) -> &str {
        self.apply_url.as_str()
    }
}
