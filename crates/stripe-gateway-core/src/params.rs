//! Per-call parameters passed by the host platform.
//!
//! Field names on the wire follow the host's parameter bag (`transid`,
//! `clientdetails`, `cardnum`, ...).

use serde::Deserialize;

use crate::amount::{deserialize_amount, deserialize_optional_amount};
use crate::error::{GatewayError, Result};

/// Client details attached to every call.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientDetails {
    /// Client email; the key of the local customer mapping.
    pub email: String,
}

/// Parameters for capturing a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureParams {
    /// Amount in major units.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// ISO currency code, any case.
    pub currency: String,
    /// Charge description (usually the invoice reference).
    #[serde(default)]
    pub description: String,
    /// The paying client.
    #[serde(rename = "clientdetails")]
    pub client_details: ClientDetails,
}

/// Parameters for refunding a previous capture.
#[derive(Debug, Clone, Deserialize)]
pub struct RefundParams {
    /// Transaction id returned by the capture.
    #[serde(rename = "transid")]
    pub transaction_id: String,
    /// Amount to refund in major units; `None` or zero refunds in full.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub amount: Option<f64>,
}

/// Parameters for storing or removing a card on the processor.
///
/// An empty `card_number` means the host is asking to remove the stored card.
#[derive(Clone, Deserialize)]
pub struct StoreRemoteParams {
    /// The card holder.
    #[serde(rename = "clientdetails")]
    pub client_details: ClientDetails,
    /// Raw card number, or a masked placeholder when the browser tokenized it.
    #[serde(rename = "cardnum", default)]
    pub card_number: String,
    /// Card expiry in `MMYY` form.
    #[serde(rename = "cardexp", default)]
    pub card_expiry: String,
    /// Card verification code.
    #[serde(rename = "cardcvv", default)]
    pub card_cvv: String,
    /// Source id of the stored card, if any.
    #[serde(rename = "gatewayid", default)]
    pub gateway_id: Option<String>,
    /// Token posted by the browser tokenization script.
    #[serde(rename = "stripeToken", default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for StoreRemoteParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRemoteParams")
            .field("client_details", &self.client_details)
            .field("has_card_number", &!self.card_number.is_empty())
            .field("gateway_id", &self.gateway_id)
            .field("has_token", &self.token_value().is_some())
            .finish_non_exhaustive()
    }
}

/// What a store-remote call asks the processor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRemoteAction {
    /// Attach a new card to the customer.
    Tokenize,
    /// Detach the stored card.
    Remove,
}

impl StoreRemoteParams {
    /// Which action the host is requesting.
    #[must_use]
    pub fn action(&self) -> StoreRemoteAction {
        if self.card_number.trim().is_empty() {
            StoreRemoteAction::Remove
        } else {
            StoreRemoteAction::Tokenize
        }
    }

    /// The browser token, ignoring empty values.
    #[must_use]
    pub fn token_value(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// The stored source id, ignoring empty values.
    #[must_use]
    pub fn gateway_id_value(&self) -> Option<&str> {
        self.gateway_id
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// Split the `MMYY` expiry into month and year.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidCardExpiry` when the expiry is shorter
    /// than three characters or not ASCII digits.
    pub fn expiry_parts(&self) -> Result<(&str, &str)> {
        let expiry = self.card_expiry.trim();
        if expiry.len() < 3 || !expiry.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::InvalidCardExpiry(expiry.to_string()));
        }
        Ok(expiry.split_at(2))
    }
}
