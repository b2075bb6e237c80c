//! UI hook handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use stripe_gateway_core::GATEWAY_NAME;

use crate::auth::HostAuth;
use crate::error::ApiError;
use crate::hooks::{self, GatewayVariables, Widget};
use crate::state::AppState;

/// Client area footer query parameters.
#[derive(Debug, Deserialize)]
pub struct FooterQuery {
    /// Template being rendered (`viewcart`, `creditcard`, ...).
    #[serde(default)]
    pub templatefile: String,
}

/// Footer hook response.
#[derive(Debug, Serialize)]
pub struct FooterResponse {
    /// HTML to append to the page footer, if any.
    pub output: Option<String>,
}

/// Footer output for a client area page.
pub async fn client_area_footer(
    State(state): State<Arc<AppState>>,
    _auth: HostAuth,
    Query(query): Query<FooterQuery>,
) -> Json<FooterResponse> {
    Json(FooterResponse {
        output: hooks::client_area_footer(&query.templatefile, &state.config),
    })
}

/// Admin dashboard balance widget.
pub async fn admin_home_widget(
    State(state): State<Arc<AppState>>,
    _auth: HostAuth,
) -> Result<Json<Widget>, ApiError> {
    if state.config.gateway_variables(GATEWAY_NAME).is_none() {
        return Err(ApiError::NotFound("Stripe gateway not configured".into()));
    }

    Ok(Json(hooks::balance_widget(&state.stripe).await))
}
