//! Stripe integration for charges, refunds and stored cards.
//!
//! Stripe handles:
//! - Charges against a customer's stored card
//! - Refunds of earlier charges
//! - Customer and card source management
//! - The account balance shown on the admin dashboard

pub mod client;
pub mod types;

pub use client::{CardSource, ClientOptions, ProcessorResponse, StripeClient, StripeError};
pub use types::*;
