//! Whop Checkout Integration
//!
//! Opens hosted checkout sessions on Whop; the returned `purchase_url` is
//! where the browser goes to pay.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::config::RelayConfig;
use crate::error::{PaymentError, Result};
use crate::provider::{CheckoutProvider, ProviderReply, SessionRequest};

/// Whop API client
pub struct WhopClient {
    http: reqwest::Client,
    api_url: String,
}

impl WhopClient {
    /// Create a client for the configured endpoint and timeout
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PaymentError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
        })
    }
}

/// `Authorization` value; keys stored with their `Bearer ` prefix pass through
pub fn bearer(api_key: &str) -> String {
    let api_key = api_key.trim();
    if api_key.starts_with("Bearer ") {
        api_key.to_string()
    } else {
        format!("Bearer {api_key}")
    }
}

#[async_trait]
impl CheckoutProvider for WhopClient {
    async fn create_session(&self, api_key: &str, session: &SessionRequest) -> Result<ProviderReply> {
        let response = self
            .http
            .post(&self.api_url)
            .header(AUTHORIZATION, bearer(api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(session)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProviderReply { status, body })
    }

    fn name(&self) -> &str {
        "whop"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::provider::LeadMetadata;

    fn session() -> SessionRequest {
        SessionRequest {
            plan_id: "plan_abc".into(),
            metadata: LeadMetadata {
                company_name: "Rossi Srl".into(),
                full_name: "Anna Rossi".into(),
                email: "anna@rossi.it".into(),
                phone: "+393401234567".into(),
                sector: Some("saas".into()),
                social_link: None,
            },
        }
    }

    #[test]
    fn test_bearer_prefix() {
        assert_eq!(bearer("sk_live"), "Bearer sk_live");
        assert_eq!(bearer("Bearer sk_live"), "Bearer sk_live");
    }

    #[tokio::test]
    async fn test_posts_session_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/checkout_sessions"))
            .and(header("authorization", "Bearer sk_test"))
            .and(body_json(json!({
                "plan_id": "plan_abc",
                "metadata": {
                    "companyName": "Rossi Srl",
                    "fullName": "Anna Rossi",
                    "email": "anna@rossi.it",
                    "phone": "+393401234567",
                    "sector": "saas"
                }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"purchase_url": "https://whop.com/checkout/x"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = RelayConfig::default()
            .with_api_url(format!("{}/api/v2/checkout_sessions", server.uri()));
        let client = WhopClient::new(&config).unwrap();

        let reply = client.create_session("sk_test", &session()).await.unwrap();
        assert_eq!(reply.status, 201);
        assert!(reply.is_success());
        assert!(reply.body.contains("https://whop.com/checkout/x"));
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let config = RelayConfig::default().with_api_url(server.uri());
        let client = WhopClient::new(&config).unwrap();

        let reply = client.create_session("bad", &session()).await.unwrap();
        assert_eq!(reply, ProviderReply::new(401, "unauthorized"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let config = RelayConfig::default().with_api_url("http://127.0.0.1:9/checkout_sessions");
        let client = WhopClient::new(&config).unwrap();

        let err = client.create_session("sk_test", &session()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Transport(_)));
    }
}
