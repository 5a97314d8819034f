//! Relay Configuration

use std::time::Duration;

/// Whop checkout-session endpoint
pub const DEFAULT_API_URL: &str = "https://api.whop.com/api/v2/checkout_sessions";

/// Server-held checkout settings
///
/// Credential and plan are optional here on purpose: their absence is
/// reported per request as a server configuration error.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Whop API key, with or without the `Bearer ` prefix
    pub api_key: Option<String>,

    /// Plan the checkout session is opened for
    pub plan_id: Option<String>,

    /// Checkout-session endpoint
    pub api_url: String,

    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            plan_id: None,
            api_url: DEFAULT_API_URL.into(),
            timeout_secs: 30,
        }
    }
}

impl RelayConfig {
    /// Read `WHOP_API_KEY`, `WHOP_PLAN_ID`, `WHOP_API_URL`, `WHOP_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset and an
    /// unparsable timeout falls back to the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("WHOP_API_KEY"),
            plan_id: non_empty("WHOP_PLAN_ID"),
            api_url: non_empty("WHOP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            timeout_secs: non_empty("WHOP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>, plan_id: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.plan_id = Some(plan_id.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Both credential and plan are present
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.plan_id.is_some()
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
