//! Customer mapping storage for the Stripe gateway.
//!
//! The gateway keeps one local table, `stripe_customers`, linking a client
//! email to the processor's customer id. Two backends are provided:
//!
//! - [`PgCustomerStore`]: PostgreSQL via `sqlx`
//! - [`MemoryStore`]: in-process, for tests and database-less deployments
//!
//! # Example
//!
//! ```no_run
//! use stripe_gateway_store::{CustomerStore, PgCustomerStore};
//!
//! # async fn example() -> stripe_gateway_store::Result<()> {
//! let store = PgCustomerStore::connect("postgres://localhost/billing").await?;
//! store.ensure_schema().await?;
//!
//! if store.find_by_email("ann@example.com").await?.is_none() {
//!     store.insert("cus_123", "ann@example.com").await?;
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgCustomerStore;

use async_trait::async_trait;
use stripe_gateway_core::CustomerMapping;

/// Storage operations on the customer mapping table.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Create the mapping table if it does not exist. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn ensure_schema(&self) -> Result<()>;

    /// Look up the mapping for an email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerMapping>>;

    /// Insert a new mapping.
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate` if the email or processor id is already mapped.
    /// - `StoreError::Database` if the database operation fails.
    async fn insert(&self, processor_customer_id: &str, email: &str) -> Result<CustomerMapping>;
}
