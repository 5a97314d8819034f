//! Starter funnel HTTP server
//!
//! Axum router exposing the checkout relay next to the compiled front end.

pub mod config;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use funnel_core::CHECKOUT_PATH;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use state::AppState;

use crate::handlers::{create_checkout, health_check};

/// API routes only
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(CHECKOUT_PATH, post(create_checkout))
        .with_state(state)
}

/// Full application: API, static front end, CORS and request tracing
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
