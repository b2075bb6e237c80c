//! Error types for the gateway module.

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors raised while preparing a processor request.
///
/// Processor outcomes (declines, failed refunds) are never errors; they are
/// reported through the result types in [`crate::outcome`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Amount could not be converted to minor units.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Card expiry is not in `MMYY` form.
    #[error("invalid card expiry: {0}")]
    InvalidCardExpiry(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),
}
