//! # funnel-payments
//!
//! Checkout relay for the starter-trial funnel.
//!
//! The lead form never talks to the payment provider. It posts the lead to
//! `/api/checkout`; the relay attaches the server-held Whop key and plan,
//! opens a hosted checkout session, and hands the `purchase_url` back so the
//! browser can leave for the provider's page.
//!
//! ```text
//! ┌─────────────┐  lead JSON   ┌─────────────┐  plan + key   ┌─────────────┐
//! │  Lead form  │─────────────▶│    Relay    │──────────────▶│    Whop     │
//! │  (browser)  │◀─────────────│/api/checkout│◀──────────────│  sessions   │
//! └─────────────┘ purchase_url └─────────────┘  purchase_url └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use funnel_payments::CheckoutRelay;
//!
//! let relay = CheckoutRelay::from_env()?;
//! match relay.relay(&raw_body).await {
//!     Ok(response) => redirect_to(response.purchase_url),
//!     Err(e) => respond(e.status_code(), e.user_message()),
//! }
//! ```

mod checkout;
mod config;
mod error;
mod provider;
mod relay;
#[cfg(feature = "axum-handlers")]
mod response;

pub use checkout::{bearer, WhopClient};
pub use config::{RelayConfig, DEFAULT_API_URL};
pub use error::{PaymentError, RelayError, Result};
pub use provider::{CheckoutProvider, LeadMetadata, ProviderReply, SessionRequest};
pub use relay::{interpret, CheckoutForm, CheckoutRelay, RelayStage};
