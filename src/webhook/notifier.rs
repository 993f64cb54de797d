//! Outbound notifications to the workflow-automation system.
//!
//! Delivery is fire-and-forget: `notify` spawns a detached task and returns
//! immediately. Failures are logged and dropped, so a slow or broken receiver
//! can never affect a dashboard response.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use crate::errors::DashboardError;

#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    pub event: String,
    pub sent_at: DateTime<Utc>,
    pub data: Value,
}

#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Option<Arc<str>>,
}

impl WebhookNotifier {
    pub fn new(url: Option<&str>, timeout: Duration) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Network(format!("Failed to build webhook client: {}", e)))?;
        let url = url.map(str::trim).filter(|u| !u.is_empty()).map(Arc::from);
        Ok(Self { client, url })
    }

    /// A notifier with no receiver; every `notify` is a no-op.
    pub fn disabled() -> Self {
        Self { client: Client::new(), url: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Post `event` in the background. Must be called from within a Tokio runtime.
    pub fn notify(&self, event: &str, data: Value) {
        let Some(url) = self.url.clone() else {
            debug!(event, "Webhook disabled, skipping notification");
            return;
        };

        let payload = WebhookEvent {
            event: event.to_string(),
            sent_at: Utc::now(),
            data,
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.post(url.as_ref()).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!(event = %payload.event, status = %resp.status(), "Webhook delivered");
                }
                Ok(resp) => {
                    warn!(event = %payload.event, status = %resp.status(), "Webhook receiver rejected notification");
                }
                Err(e) => {
                    warn!(event = %payload.event, error = %e, "Webhook delivery failed");
                }
            }
        });
    }
}
