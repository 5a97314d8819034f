//! Payment Error Types

use thiserror::Error;

use crate::relay::RelayStage;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Provider plumbing errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Checkout provider could not be reached
    #[error("Provider transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Relay failures, one per row of the error taxonomy
///
/// Every variant is terminal for the submission attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("WHOP_API_KEY is not configured")]
    MissingApiKey,

    #[error("WHOP_PLAN_ID is not configured")]
    MissingPlanId,

    /// Request body is not the expected JSON
    #[error("Invalid request body: {0}")]
    InvalidFormat(String),

    /// Required lead fields absent or blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Provider call failed before any answer
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    /// Provider answered non-2xx
    #[error("Provider rejected session ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Provider answered 2xx without `purchase_url`
    #[error("Provider response missing purchase_url")]
    MissingRedirectUrl,
}

impl RelayError {
    /// HTTP status for the relay response
    ///
    /// Provider statuses pass through when they are real error codes.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingApiKey | Self::MissingPlanId | Self::MissingRedirectUrl => 500,
            Self::InvalidFormat(_) | Self::MissingFields(_) => 400,
            Self::Unreachable(_) => 502,
            Self::Provider { status, .. } => {
                if *status >= 400 && *status < 600 {
                    *status
                } else {
                    502
                }
            }
        }
    }

    /// Last stage the relay completed before failing
    pub const fn stage(&self) -> RelayStage {
        match self {
            Self::MissingApiKey | Self::MissingPlanId => RelayStage::Start,
            Self::InvalidFormat(_) => RelayStage::ConfigChecked,
            Self::MissingFields(_) => RelayStage::BodyParsed,
            Self::Unreachable(_) => RelayStage::FieldsValidated,
            Self::Provider { .. } | Self::MissingRedirectUrl => RelayStage::ProviderCalled,
        }
    }

    /// Text for the `error` field of the response body
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => "Server configuration error: Missing API Key.".into(),
            Self::MissingPlanId => "Server configuration error: Missing Plan ID.".into(),
            Self::InvalidFormat(_) => "Invalid JSON format received from client.".into(),
            Self::MissingFields(_) => "Missing required form fields.".into(),
            Self::Unreachable(_) => "Checkout provider is unreachable. Please try again.".into(),
            Self::Provider { message, .. } => message.clone(),
            Self::MissingRedirectUrl => "Missing redirect URL from checkout provider.".into(),
        }
    }
}
