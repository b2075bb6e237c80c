//! Gateway module entry points: metadata, configuration, schema and the
//! three payment operations.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use stripe_gateway_core::{
    config_fields, metadata, CaptureParams, ConfigField, GatewayResult, ModuleMetadata,
    RefundParams, StoreRemoteParams,
};

use crate::auth::HostAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// One entry of the configuration declaration.
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    /// Setting key.
    pub key: &'static str,
    /// Field declaration.
    #[serde(flatten)]
    pub field: ConfigField,
}

/// Schema bootstrap response.
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// Always "ok".
    pub status: &'static str,
}

/// Module metadata.
pub async fn get_metadata(_auth: HostAuth) -> Json<ModuleMetadata> {
    Json(metadata())
}

/// Configuration declaration for the admin UI, in display order.
pub async fn get_config(_auth: HostAuth) -> Json<Vec<ConfigEntry>> {
    Json(
        config_fields()
            .into_iter()
            .map(|field| ConfigEntry {
                key: field.key,
                field,
            })
            .collect(),
    )
}

/// Create the customer mapping table if needed.
pub async fn ensure_schema(
    State(state): State<Arc<AppState>>,
    _auth: HostAuth,
) -> Result<Json<SchemaResponse>, ApiError> {
    state.gateway.ensure_schema().await?;
    Ok(Json(SchemaResponse { status: "ok" }))
}

/// Capture a payment.
pub async fn capture(
    State(state): State<Arc<AppState>>,
    auth: HostAuth,
    Json(params): Json<CaptureParams>,
) -> Result<Json<GatewayResult>, ApiError> {
    tracing::debug!(host = %auth.host_name, email = %params.client_details.email, "Capture requested");
    let result = state.gateway.capture(&params).await?;
    Ok(Json(result))
}

/// Refund a transaction.
pub async fn refund(
    State(state): State<Arc<AppState>>,
    auth: HostAuth,
    Json(params): Json<RefundParams>,
) -> Result<Json<GatewayResult>, ApiError> {
    tracing::debug!(host = %auth.host_name, transaction_id = %params.transaction_id, "Refund requested");
    let result = state.gateway.refund(&params).await?;
    Ok(Json(result))
}

/// Store or remove a card.
pub async fn store_remote(
    State(state): State<Arc<AppState>>,
    auth: HostAuth,
    Json(params): Json<StoreRemoteParams>,
) -> Result<Json<GatewayResult>, ApiError> {
    tracing::debug!(host = %auth.host_name, params = ?params, "Card storage requested");
    let result = state.gateway.store_remote(&params).await?;
    Ok(Json(result))
}
