//! HTTP Handlers

use axum::{extract::State, Json};
use funnel_core::CheckoutResponse;
use funnel_payments::RelayError;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub provider_configured: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.relay.provider_name().to_string(),
        provider_configured: state.relay.is_configured(),
    })
}

/// Relay a lead to the checkout provider
///
/// The body is taken raw so malformed JSON is reported by the relay with its
/// own error shape instead of axum's rejection text.
pub async fn create_checkout(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<CheckoutResponse>, RelayError> {
    state.relay.relay(&body).await.map(Json)
}
