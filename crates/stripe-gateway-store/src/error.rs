//! Error types for customer mapping storage.

use stripe_gateway_core::GatewayError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A mapping already exists for the email or processor customer id.
    #[error("duplicate customer mapping: {email}")]
    Duplicate {
        /// The email that was being inserted.
        email: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
