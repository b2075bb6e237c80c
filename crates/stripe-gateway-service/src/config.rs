//! Service configuration.

use serde::Deserialize;
use std::path::Path;

use stripe_gateway_core::{parse_yes_no, GatewaySettings, GATEWAY_NAME};

use crate::hooks::GatewayVariables;
use crate::stripe::StripeClient;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// PostgreSQL URL for the customer mapping table. In-memory when unset.
    pub database_url: Option<String>,

    /// API key the host platform presents in `x-api-key`.
    pub host_api_key: Option<String>,

    /// Gateway settings (keys and mode).
    pub gateway: GatewaySettings,

    /// Stripe API base URL.
    pub stripe_api_base: String,

    /// Timeout for Stripe calls in seconds.
    pub stripe_timeout_seconds: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    #[serde(default)]
    test_secret_key: String,
    #[serde(default)]
    test_public_key: String,
    #[serde(default)]
    live_secret_key: String,
    #[serde(default)]
    live_public_key: String,
    #[serde(default)]
    test_mode: Option<bool>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load Stripe secrets from file first, then fall back to env vars
        let gateway = load_gateway_settings();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            host_api_key: std::env::var("HOST_API_KEY").ok().filter(|s| !s.is_empty()),
            gateway,
            stripe_api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| StripeClient::BASE_URL.into()),
            stripe_timeout_seconds: std::env::var("STRIPE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024), // 64KB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Whether any Stripe key is configured.
    #[must_use]
    pub fn has_gateway_keys(&self) -> bool {
        let g = &self.gateway;
        [
            &g.test_secret_key,
            &g.test_public_key,
            &g.live_secret_key,
            &g.live_public_key,
        ]
        .iter()
        .any(|k| !k.is_empty())
    }
}

impl GatewayVariables for ServiceConfig {
    fn gateway_variables(&self, gateway: &str) -> Option<GatewaySettings> {
        (gateway == GATEWAY_NAME && self.has_gateway_keys()).then(|| self.gateway.clone())
    }
}

/// Load gateway settings from file or environment.
fn load_gateway_settings() -> GatewaySettings {
    let secret_paths = [
        ".secrets/stripe.json",
        "stripe-gateway/.secrets/stripe.json",
        "../.secrets/stripe.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<StripeSecrets>(path) {
            tracing::info!(path = %path, "Loaded Stripe secrets from file");
            return GatewaySettings {
                test_secret_key: secrets.test_secret_key,
                test_public_key: secrets.test_public_key,
                live_secret_key: secrets.live_secret_key,
                live_public_key: secrets.live_public_key,
                test_mode: secrets
                    .test_mode
                    .unwrap_or_else(|| env_test_mode().unwrap_or(false)),
            };
        }
    }

    // Fall back to environment variables
    tracing::debug!("Stripe secrets file not found, using environment variables");
    GatewaySettings {
        test_secret_key: std::env::var("STRIPE_TEST_SECRET_KEY").unwrap_or_default(),
        test_public_key: std::env::var("STRIPE_TEST_PUBLIC_KEY").unwrap_or_default(),
        live_secret_key: std::env::var("STRIPE_LIVE_SECRET_KEY").unwrap_or_default(),
        live_public_key: std::env::var("STRIPE_LIVE_PUBLIC_KEY").unwrap_or_default(),
        test_mode: env_test_mode().unwrap_or(false),
    }
}

/// `STRIPE_TEST_MODE` takes `true`/`false` or the host's `"on"` encoding.
fn env_test_mode() -> Option<bool> {
    std::env::var("STRIPE_TEST_MODE")
        .ok()
        .map(|v| v.trim().parse::<bool>().unwrap_or_else(|_| parse_yes_no(v.trim())))
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_url: None,
            host_api_key: None,
            gateway: GatewaySettings::default(),
            stripe_api_base: StripeClient::BASE_URL.into(),
            stripe_timeout_seconds: 30,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_variables_require_keys() {
        let config = ServiceConfig::default();
        assert!(config.gateway_variables("stripe").is_none());

        let config = ServiceConfig {
            gateway: GatewaySettings {
                live_public_key: "pk_live_1".into(),
                ..GatewaySettings::default()
            },
            ..ServiceConfig::default()
        };
        let settings = config.gateway_variables("stripe").unwrap();
        assert_eq!(settings.live_public_key, "pk_live_1");
        assert!(config.gateway_variables("paypal").is_none());
    }

    #[test]
    fn secrets_file_parses() {
        let secrets: StripeSecrets = serde_json::from_str(
            r#"{"test_secret_key":"sk_test_1","test_public_key":"pk_test_1","test_mode":true}"#,
        )
        .unwrap();
        assert_eq!(secrets.test_secret_key, "sk_test_1");
        assert_eq!(secrets.test_mode, Some(true));
        assert!(secrets.live_secret_key.is_empty());
    }
}
