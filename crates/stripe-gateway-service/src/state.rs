//! Application state.

use std::sync::Arc;

use stripe_gateway_store::CustomerStore;

use crate::config::ServiceConfig;
use crate::gateway::Gateway;
use crate::stripe::{ClientOptions, StripeClient, StripeError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Stripe client using the secret key for the configured mode.
    pub stripe: Arc<StripeClient>,

    /// Gateway operations.
    pub gateway: Gateway,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Stripe HTTP client cannot be built.
    pub fn new(store: Arc<dyn CustomerStore>, config: ServiceConfig) -> Result<Self, StripeError> {
        let credentials = config.gateway.credentials();
        if credentials.secret_key.is_empty() {
            tracing::warn!(
                mode = config.gateway.mode(),
                "Stripe secret key not configured - processor calls will be rejected by Stripe"
            );
        }

        let stripe = Arc::new(StripeClient::with_options(
            credentials.secret_key,
            ClientOptions {
                base_url: config.stripe_api_base.clone(),
                timeout_seconds: config.stripe_timeout_seconds,
            },
        )?);
        tracing::info!(mode = config.gateway.mode(), "Stripe integration enabled");

        let gateway = Gateway::new(stripe.clone(), store);

        Ok(Self {
            config,
            stripe,
            gateway,
        })
    }
}
