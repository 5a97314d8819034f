//! Checkout Provider Abstraction
//!
//! The relay only needs "POST this session, give me status and body back".
//! Interpreting the reply is the relay's job, so stubs can hand back any
//! status/body pair.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Checkout provider (Strategy pattern)
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Open a checkout session, single attempt
    async fn create_session(&self, api_key: &str, session: &SessionRequest) -> Result<ProviderReply>;

    /// Provider name for logs and health output
    fn name(&self) -> &str;
}

/// Outbound checkout-session body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub plan_id: String,
    pub metadata: LeadMetadata,
}

/// Lead fields attached to the session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadMetadata {
    pub company_name: String,
    pub full_name: String,
    pub email: String,
    /// International form, country code included
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_link: Option<String>,
}

/// Raw provider answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

impl ProviderReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
