//! Stripe Gateway Service - host bridge for the Stripe payment gateway module
//!
//! This is the main entry point for the stripe-gateway service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stripe_gateway_service::{create_router, AppState, ServiceConfig};
use stripe_gateway_store::{CustomerStore, MemoryStore, PgCustomerStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stripe_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stripe Gateway Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        mode = config.gateway.mode(),
        database_configured = %config.database_url.is_some(),
        host_key_configured = %config.host_api_key.is_some(),
        stripe_api_base = %config.stripe_api_base,
        "Service configuration loaded"
    );

    if config.host_api_key.is_none() {
        tracing::warn!("HOST_API_KEY not set - all /v1 requests will be rejected");
    }

    // Open the customer mapping store
    let store: Arc<dyn CustomerStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL");
            Arc::new(PgCustomerStore::connect(url).await?)
        }
        None => {
            tracing::warn!("DATABASE_URL not set - customer mappings are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    store.ensure_schema().await?;
    tracing::info!("Customer mapping table ready");

    // Build app state
    let state = AppState::new(store, config.clone())?;

    // Create the router
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
