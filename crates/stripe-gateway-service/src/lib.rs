//! Stripe payment gateway module and its host bridge service.
//!
//! This crate provides:
//!
//! - Gateway operations: capture, refund and card storage
//! - The checkout tokenization script and the admin balance widget
//! - An HTTP API through which the host platform invokes them
//!
//! # Authentication
//!
//! All `/v1` routes require the host API key in the `X-API-Key` header.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Static handlers stay async for consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod hooks;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use gateway::Gateway;
pub use hooks::GatewayVariables;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
