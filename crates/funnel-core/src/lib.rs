//! # funnel-core
//!
//! Lead capture domain for the starter-trial landing funnel.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  advance()  ┌──────────────┐  submit()  ┌──────────────┐
//! │   Step 1     │────────────▶│   Step 2     │───────────▶│  Submitting  │
//! │ name / email │             │ bonus + 10'  │            │ POST relay   │
//! │ phone        │◀────────────│ countdown    │◀───────────│              │
//! └──────────────┘   close()   └──────────────┘   Failed   └──────┬───────┘
//!                                                                 │ purchase_url
//!                                                                 ▼
//!                                                          ┌──────────────┐
//!                                                          │ Redirecting  │
//!                                                          └──────────────┘
//! ```
//!
//! Everything in this crate is synchronous and browser-safe; the only I/O seam
//! is the [`LeadTransport`] trait, implemented over HTTP by the web front end
//! and by in-memory stubs in tests.

pub mod contract;
pub mod countdown;
pub mod error;
pub mod lead;
pub mod phone;
pub mod validation;
pub mod wizard;

pub use contract::{CheckoutResponse, ErrorBody, LeadTransport, RelayReply, CHECKOUT_PATH};
pub use countdown::{Countdown, COUNTDOWN_SECS};
pub use error::{FunnelError, Result};
pub use lead::{Bonus, LeadForm, LeadSubmission, Sector, COUNTRY_CODE};
pub use phone::{format_phone, normalize_phone, with_country_code};
pub use validation::{validate, FormErrors, FormField, Step};
pub use wizard::{FlowVariant, LeadWizard, WizardState};
