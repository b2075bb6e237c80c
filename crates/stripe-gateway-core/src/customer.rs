//! The local customer mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Links a client email to the processor's customer id.
///
/// Created on the first successful card tokenization for an email and never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerMapping {
    /// Row id.
    pub id: i64,
    /// Processor customer id (`cus_...`).
    pub processor_customer_id: String,
    /// Client email.
    pub email: String,
    /// When the row was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the row was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}
