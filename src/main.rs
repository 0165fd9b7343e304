//! Card Purchase Bridge - Main Application Entry Point
//!
//! HTTP service that turns an upstream card purchase into a gateway charge.
//!
//! # Startup Flow
//!
//! 1. Initialize logging
//! 2. Load and validate configuration from environment variables
//! 3. Build the outbound HTTP clients and the purchase service
//! 4. Build HTTP router and start server on configured port

use std::sync::Arc;

use card_purchase_bridge::{
    app::{self, AppState},
    config::Config,
    services::{purchase_service::PurchaseService, trace::RandomTraceNumbers},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        pin_service = %config.pin_reverse_url(),
        gateway = %config.gateway_charge_url,
        timeout_secs = config.http_timeout_secs,
        "Configuration loaded"
    );

    let purchases = PurchaseService::from_config(&config, Arc::new(RandomTraceNumbers))?;

    let state = AppState {
        purchases,
        terminal_working_key: Arc::from(config.terminal_working_key.as_str()),
    };

    let app = app::router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
