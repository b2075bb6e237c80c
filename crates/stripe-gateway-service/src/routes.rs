//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{gateway, health, hooks};
use crate::state::AppState;

/// Maximum concurrent requests for host API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Gateway module (host API key auth)
/// - `GET /v1/gateway/metadata` - Module metadata
/// - `GET /v1/gateway/config` - Configuration declaration
/// - `POST /v1/gateway/schema` - Create the customer mapping table
/// - `POST /v1/gateway/capture` - Capture a payment
/// - `POST /v1/gateway/refund` - Refund a transaction
/// - `POST /v1/gateway/storeremote` - Store or remove a card
///
/// ## Hooks (host API key auth)
/// - `GET /v1/hooks/client-area-footer` - Checkout tokenization script
/// - `GET /v1/hooks/admin-home-widget` - Balance widget
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    let gateway_routes = Router::new()
        .route("/metadata", get(gateway::get_metadata))
        .route("/config", get(gateway::get_config))
        .route("/schema", post(gateway::ensure_schema))
        .route("/capture", post(gateway::capture))
        .route("/refund", post(gateway::refund))
        .route("/storeremote", post(gateway::store_remote));

    let hook_routes = Router::new()
        .route("/client-area-footer", get(hooks::client_area_footer))
        .route("/admin-home-widget", get(hooks::admin_home_widget));

    let api_routes = Router::new()
        .nest("/gateway", gateway_routes)
        .nest("/hooks", hook_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}
