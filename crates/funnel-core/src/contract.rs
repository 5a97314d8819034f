//! Relay Wire Contract
//!
//! Shapes exchanged between the browser and `POST /api/checkout`, plus the
//! transport seam the wizard submits through.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lead::LeadSubmission;

/// Relay route
pub const CHECKOUT_PATH: &str = "/api/checkout";

/// Successful relay body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub purchase_url: String,
}

/// Error body for every non-2xx relay response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// What the relay answered, as seen by the form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayReply {
    /// 2xx; the URL may still be missing
    Success { purchase_url: Option<String> },
    /// Non-2xx with the server's error text when it sent one
    Failure { status: u16, error: Option<String> },
}

impl RelayReply {
    /// Interpret a raw HTTP response from the relay
    pub fn from_http(status: u16, body: &str) -> Self {
        let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
        let text = |key: &str| {
            json.get(key)
                .and_then(serde_json::Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if (200..300).contains(&status) {
            Self::Success { purchase_url: text("purchase_url") }
        } else {
            Self::Failure { status, error: text("error") }
        }
    }
}

/// Sends a finished lead to the relay
///
/// Not `Send`: the browser implementation holds JS futures.
#[async_trait(?Send)]
pub trait LeadTransport {
    async fn send(&self, submission: &LeadSubmission) -> Result<RelayReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_url() {
        let reply = RelayReply::from_http(200, r#"{"purchase_url":"https://pay.example/abc"}"#);
        assert_eq!(
            reply,
            RelayReply::Success { purchase_url: Some("https://pay.example/abc".into()) }
        );
    }

    #[test]
    fn test_success_without_url() {
        assert_eq!(
            RelayReply::from_http(200, "{}"),
            RelayReply::Success { purchase_url: None }
        );
    }

    #[test]
    fn test_failure_keeps_server_error() {
        assert_eq!(
            RelayReply::from_http(402, r#"{"error":"card_declined"}"#),
            RelayReply::Failure { status: 402, error: Some("card_declined".into()) }
        );
        assert_eq!(
            RelayReply::from_http(502, "<html>bad gateway</html>"),
            RelayReply::Failure { status: 502, error: None }
        );
    }
}
