//! Relay Client

use async_trait::async_trait;
use funnel_core::{FunnelError, LeadSubmission, LeadTransport, RelayReply, Result, CHECKOUT_PATH};

/// Posts leads to the relay on the page's own origin
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".into());

        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{origin}{CHECKOUT_PATH}"),
        }
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl LeadTransport for RelayClient {
    async fn send(&self, submission: &LeadSubmission) -> Result<RelayReply> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;

        Ok(RelayReply::from_http(status, &body))
    }
}

/// Full-page navigation to the provider
pub fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            leptos::logging::error!("redirect failed: {e:?}");
        }
    }
}
