//! Stripe API types.

use serde::Deserialize;

/// Stripe customer object, as returned when creating or updating a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Stripe customer ID.
    pub id: String,
    /// Payment sources attached to the customer.
    #[serde(default)]
    pub sources: Option<StripeList<Source>>,
}

impl Customer {
    /// ID of the first listed source, reported to the host as the stored
    /// card's gateway id.
    #[must_use]
    pub fn stored_source_id(&self) -> Option<String> {
        self.sources
            .as_ref()
            .and_then(|list| list.data.first())
            .map(|s| s.id.clone())
    }
}

/// A payment source (card) attached to a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    /// Source ID (`card_...` or `src_...`).
    pub id: String,
}

/// Stripe list response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    /// Data items.
    pub data: Vec<T>,
}

/// Stripe account balance.
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Funds available for payout, one entry per currency.
    #[serde(default)]
    pub available: Vec<BalanceAmount>,
    /// Funds not yet available, one entry per currency.
    #[serde(default)]
    pub pending: Vec<BalanceAmount>,
}

/// Balance amount in one currency.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceAmount {
    /// Amount in minor units.
    pub amount: i64,
    /// Currency (e.g., "usd").
    pub currency: String,
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_source_is_first_listed_even_with_default_source() {
        let customer: Customer = serde_json::from_str(
            r#"{"id":"cus_1","default_source":"card_default",
                "sources":{"object":"list","data":[{"id":"card_first"},{"id":"card_default"}],"has_more":false}}"#,
        )
        .unwrap();
        assert_eq!(customer.stored_source_id().as_deref(), Some("card_first"));
    }

    #[test]
    fn stored_source_from_card_listing() {
        let customer: Customer = serde_json::from_str(
            r#"{"id":"cus_1","sources":{"data":[{"id":"card_1","brand":"Visa","last4":"4242"}]}}"#,
        )
        .unwrap();
        assert_eq!(customer.stored_source_id().as_deref(), Some("card_1"));
    }

    #[test]
    fn stored_source_absent_with_empty_listing() {
        let customer: Customer =
            serde_json::from_str(r#"{"id":"cus_1","sources":{"data":[]}}"#).unwrap();
        assert!(customer.stored_source_id().is_none());
    }

    #[test]
    fn stored_source_absent_without_sources() {
        let customer: Customer = serde_json::from_str(r#"{"id":"cus_1"}"#).unwrap();
        assert!(customer.stored_source_id().is_none());
    }
}
