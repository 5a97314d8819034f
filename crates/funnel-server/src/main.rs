//! Starter funnel server
//!
//! Serves the landing page (Leptos WASM build) and relays lead submissions to
//! the Whop checkout API.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use funnel_payments::CheckoutRelay;
use funnel_server::{app, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let relay = CheckoutRelay::from_env().context("failed to build checkout relay")?;
    if relay.is_configured() {
        tracing::info!("✓ Checkout provider configured ({})", relay.provider_name());
    } else {
        tracing::warn!("⚠ Checkout provider not configured - /api/checkout will answer 500");
        tracing::warn!("  Set WHOP_API_KEY and WHOP_PLAN_ID in .env");
    }

    let app = app(AppState::new(relay), &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("🚀 starter funnel running on http://{}", config.bind_addr);
    tracing::info!("  GET  /health        - Health check");
    tracing::info!("  POST /api/checkout  - Relay lead to checkout");
    tracing::info!("  GET  /*             - Static files from {}", config.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
