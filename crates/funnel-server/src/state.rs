//! Application State

use std::sync::Arc;

use funnel_payments::CheckoutRelay;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout relay (always present; missing credentials fail per request)
    pub relay: Arc<CheckoutRelay>,
}

impl AppState {
    pub fn new(relay: CheckoutRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}
