//! Host platform authentication.
//!
//! Every `/v1` route is called by the host platform, which presents the
//! shared API key in the `X-API-Key` header.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated host platform request.
#[derive(Debug, Clone)]
pub struct HostAuth {
    /// The host name or identifier, from `X-Host-Name`.
    pub host_name: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for HostAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Check for X-API-Key header
        let api_key = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        // Validate against configured host API key
        let expected_key = state
            .config
            .host_api_key
            .as_ref()
            .ok_or(ApiError::Unauthorized)?;

        if !constant_time_eq(api_key, expected_key) {
            tracing::debug!("Rejected request with invalid host API key");
            return Err(ApiError::Unauthorized);
        }

        let host_name = parts
            .headers
            .get("x-host-name")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Ok(HostAuth { host_name })
    }
}

/// Constant-time string comparison.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
