//! PostgreSQL backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use stripe_gateway_core::CustomerMapping;

use crate::error::{Result, StoreError};
use crate::schema;
use crate::CustomerStore;

/// Maximum pooled connections. Each gateway call issues at most two queries.
const MAX_CONNECTIONS: u32 = 5;

/// Customer mapping store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Connect to the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn mapping_from_row(row: &PgRow) -> Result<CustomerMapping> {
    Ok(CustomerMapping {
        id: row.try_get("id")?,
        processor_customer_id: row.try_get("stripe_id")?,
        email: row.try_get("email")?,
        created_at: row.try_get::<Option<DateTime<Utc>>, _>("created_at")?,
        updated_at: row.try_get::<Option<DateTime<Utc>>, _>("updated_at")?,
    })
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_CUSTOMERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = schema::CUSTOMERS_TABLE, "Unable to create table");
                StoreError::from(e)
            })?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerMapping>> {
        let row = sqlx::query(schema::SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(mapping_from_row).transpose()
    }

    async fn insert(&self, processor_customer_id: &str, email: &str) -> Result<CustomerMapping> {
        let result = sqlx::query(schema::INSERT_CUSTOMER)
            .bind(processor_customer_id)
            .bind(email)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => mapping_from_row(&row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate {
                    email: email.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
