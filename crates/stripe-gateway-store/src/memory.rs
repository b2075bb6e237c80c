//! In-memory backend.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use stripe_gateway_core::CustomerMapping;

use crate::error::{Result, StoreError};
use crate::CustomerStore;

/// Customer mapping store held in process memory.
///
/// Enforces the same uniqueness rules as the database table. Contents are
/// lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<CustomerMapping>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no mappings.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerMapping>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.email == email).cloned())
    }

    async fn insert(&self, processor_customer_id: &str, email: &str) -> Result<CustomerMapping> {
        let mut rows = self.rows.write().await;

        if rows
            .iter()
            .any(|r| r.email == email || r.processor_customer_id == processor_customer_id)
        {
            return Err(StoreError::Duplicate {
                email: email.to_string(),
            });
        }

        let now = Utc::now();
        let id = rows.last().map_or(1, |r| r.id + 1);
        let mapping = CustomerMapping {
            id,
            processor_customer_id: processor_customer_id.to_string(),
            email: email.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        rows.push(mapping.clone());
        Ok(mapping)
    }
}
