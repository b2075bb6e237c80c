//! Common test utilities for stripe-gateway integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::{TestRequest, TestServer};
use wiremock::MockServer;

use stripe_gateway_core::GatewaySettings;
use stripe_gateway_service::{create_router, AppState, ServiceConfig};
use stripe_gateway_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Mock Stripe API.
    pub stripe: MockServer,
    /// Customer mapping store behind the service.
    pub store: Arc<MemoryStore>,
    /// The host API key.
    pub host_api_key: String,
}

/// Gateway settings with both key pairs filled in.
pub fn test_settings(test_mode: bool) -> GatewaySettings {
    GatewaySettings {
        test_secret_key: "sk_test_harness".into(),
        test_public_key: "pk_test_harness".into(),
        live_secret_key: "sk_live_harness".into(),
        live_public_key: "pk_live_harness".into(),
        test_mode,
    }
}

impl TestHarness {
    /// Create a new test harness in test mode with an empty store.
    pub async fn new() -> Self {
        Self::with_settings(test_settings(true)).await
    }

    /// Create a new test harness with the given gateway settings.
    pub async fn with_settings(gateway: GatewaySettings) -> Self {
        let stripe = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let host_api_key = "test-host-key".to_string();

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_url: None,
            host_api_key: Some(host_api_key.clone()),
            gateway,
            stripe_api_base: stripe.uri(),
            stripe_timeout_seconds: 5,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(store.clone(), config).expect("Failed to build state");
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            stripe,
            store,
            host_api_key,
        }
    }

    /// Attach the host API key to a request.
    pub fn authed(&self, request: TestRequest) -> TestRequest {
        request.add_header(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(&self.host_api_key).expect("valid header value"),
        )
    }

    /// Authenticated GET.
    pub fn get(&self, path: &str) -> TestRequest {
        self.authed(self.server.get(path))
    }

    /// Authenticated POST.
    pub fn post(&self, path: &str) -> TestRequest {
        self.authed(self.server.post(path))
    }
}
