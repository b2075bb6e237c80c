//! Host UI hooks.
//!
//! - Client area footer: injects the browser tokenization script on checkout
//!   pages
//! - Admin home widget: shows the Stripe balance on the admin dashboard

pub mod balance_widget;
pub mod checkout_script;

pub use balance_widget::{balance_widget, render_balance, Widget};
pub use checkout_script::{checkout_script, client_area_footer, CHECKOUT_TEMPLATES};

use stripe_gateway_core::GatewaySettings;

/// Access to the gateway settings configured on the host, by gateway name.
pub trait GatewayVariables: Send + Sync {
    /// Settings for `gateway`, or `None` when it is not configured.
    fn gateway_variables(&self, gateway: &str) -> Option<GatewaySettings>;
}
