//! Router construction and shared application state.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, services::purchase_service::PurchaseService};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub purchases: PurchaseService,
    pub terminal_working_key: Arc<str>,
}

/// Build the HTTP router.
///
/// # Routes
///
/// - `GET|POST /workingKey`
/// - `POST /purchase`
/// - `GET /health`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/workingKey",
            get(handlers::working_key::working_key).post(handlers::working_key::working_key),
        )
        .route("/purchase", post(handlers::purchase::purchase))
        // Request logging for every route
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
