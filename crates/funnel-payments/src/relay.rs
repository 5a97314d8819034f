//! Checkout Relay
//!
//! Turns a lead form body into a provider checkout session and the provider's
//! answer into `{ purchase_url }` or a [`RelayError`].
//!
//! ```text
//! Start ─▶ ConfigChecked ─▶ BodyParsed ─▶ FieldsValidated ─▶ ProviderCalled ─▶ Success
//!   │            │              │               │                  │
//!   └────────────┴──────────────┴───────────────┴──────────────────┴──────▶ Failure
//! ```
//!
//! A failing precondition stops the pipeline; the provider is called at most
//! once and never retried.

use std::fmt;
use std::sync::Arc;

use funnel_core::{with_country_code, CheckoutResponse};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::checkout::WhopClient;
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::provider::{CheckoutProvider, LeadMetadata, ProviderReply, SessionRequest};

/// Pipeline position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayStage {
    Start,
    ConfigChecked,
    BodyParsed,
    FieldsValidated,
    ProviderCalled,
    Success,
    Failure,
}

impl fmt::Display for RelayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Inbound body as sent by the lead form
///
/// Every key is optional at parse time so absent fields surface as
/// [`RelayError::MissingFields`] rather than a parse failure. Numbers are
/// taken as their decimal text; any other non-string value counts as absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub social_link: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

impl CheckoutForm {
    /// Check required fields and build the session metadata
    pub fn into_metadata(self) -> std::result::Result<LeadMetadata, RelayError> {
        let company_name = present(self.company_name);
        let full_name = present(self.full_name);
        let email = present(self.email);
        let phone = present(self.phone);

        let missing: Vec<&'static str> = [
            ("companyName", company_name.is_none()),
            ("fullName", full_name.is_none()),
            ("email", email.is_none()),
            ("phone", phone.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (company_name, full_name, email, phone) {
            (Some(company_name), Some(full_name), Some(email), Some(phone)) => Ok(LeadMetadata {
                company_name,
                full_name,
                email,
                phone: with_country_code(&phone),
                sector: present(self.sector),
                social_link: present(self.social_link),
            }),
            _ => Err(RelayError::MissingFields(missing)),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Stateless checkout relay
pub struct CheckoutRelay {
    config: RelayConfig,
    provider: Arc<dyn CheckoutProvider>,
}

impl CheckoutRelay {
    pub fn new(config: RelayConfig, provider: Arc<dyn CheckoutProvider>) -> Self {
        Self { config, provider }
    }

    /// Relay backed by [`WhopClient`], configured from the environment
    pub fn from_env() -> Result<Self> {
        let config = RelayConfig::from_env();
        let client = WhopClient::new(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub const fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Run one submission through the pipeline
    pub async fn relay(&self, raw_body: &str) -> std::result::Result<CheckoutResponse, RelayError> {
        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, stage = %RelayStage::Start, bytes = raw_body.len(), "Checkout request received");

        match self.run(request_id, raw_body).await {
            Ok(response) => {
                tracing::info!(
                    %request_id,
                    stage = %RelayStage::Success,
                    purchase_url = %response.purchase_url,
                    "Checkout session created"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    %request_id,
                    stage = %RelayStage::Failure,
                    failed_after = %e.stage(),
                    status = e.status_code(),
                    "Checkout relay failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    async fn run(&self, request_id: Uuid, raw_body: &str) -> std::result::Result<CheckoutResponse, RelayError> {
        let api_key = self.config.api_key.as_deref().ok_or(RelayError::MissingApiKey)?;
        let plan_id = self.config.plan_id.as_deref().ok_or(RelayError::MissingPlanId)?;
        tracing::debug!(%request_id, stage = %RelayStage::ConfigChecked, "Checkout credentials present");

        let form: CheckoutForm =
            serde_json::from_str(raw_body).map_err(|e| RelayError::InvalidFormat(e.to_string()))?;
        tracing::debug!(%request_id, stage = %RelayStage::BodyParsed, ?form, "Parsed lead form");

        let metadata = form.into_metadata()?;
        tracing::debug!(%request_id, stage = %RelayStage::FieldsValidated, "Lead fields validated");

        let session = SessionRequest {
            plan_id: plan_id.to_string(),
            metadata,
        };

        tracing::info!(%request_id, provider = self.provider.name(), "Calling checkout provider");
        let reply = self
            .provider
            .create_session(api_key, &session)
            .await
            .map_err(|e| RelayError::Unreachable(e.to_string()))?;
        tracing::info!(
            %request_id,
            stage = %RelayStage::ProviderCalled,
            status = reply.status,
            "Checkout provider responded"
        );

        interpret(&reply)
    }
}

/// Map a provider answer onto the relay contract
pub fn interpret(reply: &ProviderReply) -> std::result::Result<CheckoutResponse, RelayError> {
    if !reply.is_success() {
        let message = provider_error(&reply.body).unwrap_or_else(|| {
            format!("Failed to create checkout session. Status: {}", reply.status)
        });
        return Err(RelayError::Provider {
            status: reply.status,
            message,
        });
    }

    let json: Value = serde_json::from_str(&reply.body).unwrap_or_default();
    json.get("purchase_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(|url| CheckoutResponse {
            purchase_url: url.to_string(),
        })
        .ok_or(RelayError::MissingRedirectUrl)
}

/// Best error text in a provider body: `error`, `error.message`, `message`,
/// else the raw text
fn provider_error(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    let text = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    text(json.get("error"))
        .or_else(|| text(json.get("error").and_then(|e| e.get("message"))))
        .or_else(|| text(json.get("message")))
        .or_else(|| Some(body.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::PaymentError;

    struct StubProvider {
        reply: std::result::Result<ProviderReply, String>,
        calls: AtomicUsize,
        last: Mutex<Option<(String, SessionRequest)>>,
    }

    impl StubProvider {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(ProviderReply::new(status, body)),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn down() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection refused".into()),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CheckoutProvider for StubProvider {
        async fn create_session(&self, api_key: &str, session: &SessionRequest) -> Result<ProviderReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((api_key.to_string(), session.clone()));
            self.reply.clone().map_err(PaymentError::Transport)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn relay_with(provider: Arc<StubProvider>) -> CheckoutRelay {
        let config = RelayConfig::default().with_credentials("Bearer sk_test", "plan_abc");
        CheckoutRelay::new(config, provider)
    }

    fn lead() -> Value {
        json!({
            "companyName": "Rossi Srl",
            "fullName": "Anna Rossi",
            "email": "anna@rossi.it",
            "phone": "3401234567",
            "sector": "ecommerce",
            "socialLink": ""
        })
    }

    #[tokio::test]
    async fn test_purchase_url_returned_verbatim() {
        let provider = StubProvider::replying(200, r#"{"purchase_url":"https://pay.example/abc"}"#);
        let relay = relay_with(provider.clone());

        let response = relay.relay(&lead().to_string()).await.unwrap();

        assert_eq!(response.purchase_url, "https://pay.example/abc");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_session_carries_plan_key_and_prefixed_phone() {
        let provider = StubProvider::replying(200, r#"{"purchase_url":"https://pay.example/abc"}"#);
        let relay = relay_with(provider.clone());
        relay.relay(&lead().to_string()).await.unwrap();

        let (api_key, session) = provider.last.lock().unwrap().clone().unwrap();
        assert_eq!(api_key, "Bearer sk_test");
        assert_eq!(session.plan_id, "plan_abc");
        assert_eq!(session.metadata.phone, "+393401234567");
        assert_eq!(session.metadata.sector.as_deref(), Some("ecommerce"));
        assert_eq!(session.metadata.social_link, None);
    }

    #[tokio::test]
    async fn test_missing_email_rejected_without_provider_call() {
        let provider = StubProvider::replying(200, r#"{"purchase_url":"https://pay.example/abc"}"#);
        let relay = relay_with(provider.clone());
        let mut body = lead();
        body.as_object_mut().unwrap().remove("email");

        let err = relay.relay(&body.to_string()).await.unwrap_err();

        assert_eq!(err, RelayError::MissingFields(vec!["email"]));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.stage(), RelayStage::BodyParsed);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_company_counts_as_missing() {
        let provider = StubProvider::replying(200, "{}");
        let relay = relay_with(provider.clone());
        let mut body = lead();
        body["companyName"] = json!("   ");

        let err = relay.relay(&body.to_string()).await.unwrap_err();
        assert_eq!(err.user_message(), "Missing required form fields.");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_numeric_phone_is_accepted() {
        let provider = StubProvider::replying(200, r#"{"purchase_url":"https://pay.example/abc"}"#);
        let relay = relay_with(provider.clone());
        let mut body = lead();
        body["phone"] = json!(3_331_234_567_u64);

        relay.relay(&body.to_string()).await.unwrap();

        let (_, session) = provider.last.lock().unwrap().clone().unwrap();
        assert_eq!(session.metadata.phone, "+393331234567");
    }

    #[tokio::test]
    async fn test_wrong_typed_field_counts_as_missing() {
        let provider = StubProvider::replying(200, r#"{"purchase_url":"https://pay.example/abc"}"#);
        let relay = relay_with(provider.clone());
        let mut body = lead();
        body["email"] = json!(true);
        body["fullName"] = json!({"first": "Anna"});

        let err = relay.relay(&body.to_string()).await.unwrap_err();

        assert_eq!(err, RelayError::MissingFields(vec!["fullName", "email"]));
        assert_eq!(err.status_code(), 400);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_rejection_passes_through() {
        let provider = StubProvider::replying(402, r#"{"error":"card_declined"}"#);
        let relay = relay_with(provider);

        let err = relay.relay(&lead().to_string()).await.unwrap_err();

        assert_eq!(err.status_code(), 402);
        assert_eq!(err.user_message(), "card_declined");
    }

    #[tokio::test]
    async fn test_success_without_purchase_url_fails() {
        let provider = StubProvider::replying(200, r#"{"id":"ch_123"}"#);
        let relay = relay_with(provider);

        let err = relay.relay(&lead().to_string()).await.unwrap_err();

        assert_eq!(err, RelayError::MissingRedirectUrl);
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit() {
        let provider = StubProvider::replying(200, r#"{"purchase_url":"https://pay.example/abc"}"#);

        let no_key = CheckoutRelay::new(RelayConfig::default(), provider.clone());
        let err = no_key.relay(&lead().to_string()).await.unwrap_err();
        assert_eq!(err, RelayError::MissingApiKey);
        assert_eq!(err.status_code(), 500);

        let mut config = RelayConfig::default();
        config.api_key = Some("sk_test".into());
        let no_plan = CheckoutRelay::new(config, provider.clone());
        let err = no_plan.relay("not even json").await.unwrap_err();
        assert_eq!(err, RelayError::MissingPlanId);
        assert_eq!(err.user_message(), "Server configuration error: Missing Plan ID.");

        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_json_is_client_error() {
        let provider = StubProvider::replying(200, "{}");
        let relay = relay_with(provider.clone());

        let err = relay.relay("{fullName: oops").await.unwrap_err();

        assert!(matches!(err, RelayError::InvalidFormat(_)));
        assert_eq!(err.status_code(), 400);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_bad_gateway() {
        let relay = relay_with(StubProvider::down());
        let err = relay.relay(&lead().to_string()).await.unwrap_err();
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.stage(), RelayStage::FieldsValidated);
    }

    #[test]
    fn test_provider_error_text_extraction() {
        let err = |status, body: &str| interpret(&ProviderReply::new(status, body)).unwrap_err();

        assert_eq!(
            err(422, r#"{"error":{"status":422,"message":"Plan is archived"}}"#).user_message(),
            "Plan is archived"
        );
        assert_eq!(err(503, "Service Unavailable").user_message(), "Service Unavailable");
        assert_eq!(
            err(404, "").user_message(),
            "Failed to create checkout session. Status: 404"
        );
    }

    #[test]
    fn test_non_error_status_maps_to_bad_gateway() {
        let err = interpret(&ProviderReply::new(302, "")).unwrap_err();
        assert_eq!(err.status_code(), 502);
    }
}
