//! Table definition for the customer mapping.

/// Name of the customer mapping table.
pub const CUSTOMERS_TABLE: &str = "stripe_customers";

/// Statement that creates the customer mapping table if it is missing.
///
/// Both `stripe_id` and `email` are unique, so each email maps to at most one
/// processor customer and the other way round.
pub const CREATE_CUSTOMERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS stripe_customers (
    id          BIGSERIAL PRIMARY KEY,
    stripe_id   VARCHAR(255) NOT NULL UNIQUE,
    email       VARCHAR(255) NOT NULL UNIQUE,
    created_at  TIMESTAMPTZ NULL,
    updated_at  TIMESTAMPTZ NULL
)";

/// Look up a mapping by email.
pub const SELECT_BY_EMAIL: &str = r"
SELECT id, stripe_id, email, created_at, updated_at
FROM stripe_customers
WHERE email = $1
LIMIT 1";

/// Insert a mapping, returning the stored row.
pub const INSERT_CUSTOMER: &str = r"
INSERT INTO stripe_customers (stripe_id, email, created_at, updated_at)
VALUES ($1, $2, $3, $3)
RETURNING id, stripe_id, email, created_at, updated_at";
