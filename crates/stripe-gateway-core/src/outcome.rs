//! Result shape handed back to the host platform.

use serde::{Deserialize, Serialize};

/// Outcome status of a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// The processor accepted the request.
    Success,
    /// A capture was refused.
    Declined,
    /// A refund or card storage request was refused.
    Failed,
}

impl TransactionStatus {
    /// The host's status string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Declined => "declined",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a capture, refund or store-remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResult {
    /// Outcome status.
    pub status: TransactionStatus,
    /// Processor id of the charge or refund.
    #[serde(rename = "transid", skip_serializing_if = "Option::is_none", default)]
    pub transaction_id: Option<String>,
    /// Processor id of the stored card.
    #[serde(rename = "gatewayid", skip_serializing_if = "Option::is_none", default)]
    pub gateway_id: Option<String>,
    /// Raw processor response, kept for the host's transaction log.
    #[serde(rename = "rawdata", skip_serializing_if = "Option::is_none", default)]
    pub raw_data: Option<String>,
}

impl GatewayResult {
    /// A successful call with no further data.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            status: TransactionStatus::Success,
            transaction_id: None,
            gateway_id: None,
            raw_data: None,
        }
    }

    /// A refused call carrying the raw response.
    #[must_use]
    pub fn rejected(status: TransactionStatus, raw_data: impl Into<String>) -> Self {
        Self {
            status,
            transaction_id: None,
            gateway_id: None,
            raw_data: Some(raw_data.into()),
        }
    }

    /// Attach a transaction id.
    #[must_use]
    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    /// Attach a stored card id.
    #[must_use]
    pub fn with_gateway_id(mut self, id: Option<String>) -> Self {
        self.gateway_id = id;
        self
    }

    /// Attach the raw response.
    #[must_use]
    pub fn with_raw_data(mut self, raw: impl Into<String>) -> Self {
        self.raw_data = Some(raw.into());
        self
    }

    /// Whether the call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}
