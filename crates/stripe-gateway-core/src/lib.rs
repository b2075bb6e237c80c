//! Core types for the Stripe payment gateway module.
//!
//! - **Settings**: `GatewaySettings`, the admin configuration declaration and
//!   module metadata
//! - **Parameters**: `CaptureParams`, `RefundParams`, `StoreRemoteParams`
//! - **Results**: `GatewayResult`, `TransactionStatus`
//! - **Persistence**: `CustomerMapping`
//! - **Amounts**: minor-unit conversion and display formatting
//!
//! # Amounts
//!
//! The host passes amounts in major units. The processor expects integer
//! minor units, so `12.34` is sent as `1234` (`round(amount * 100)`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod amount;
pub mod customer;
pub mod error;
pub mod outcome;
pub mod params;
pub mod settings;

pub use amount::{format_major_units, to_minor_units};
pub use customer::CustomerMapping;
pub use error::{GatewayError, Result};
pub use outcome::{GatewayResult, TransactionStatus};
pub use params::{CaptureParams, ClientDetails, RefundParams, StoreRemoteAction, StoreRemoteParams};
pub use settings::{
    config_fields, metadata, parse_yes_no, ConfigField, Credentials, FieldType, GatewaySettings,
    ModuleMetadata, DISPLAY_NAME, GATEWAY_NAME, MODULE_API_VERSION,
};
