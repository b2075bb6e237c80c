//! Admin dashboard balance widget.

use serde::Serialize;
use stripe_gateway_core::format_major_units;

use crate::stripe::{Balance, BalanceAmount, StripeClient};

/// Widget title.
pub const WIDGET_TITLE: &str = "Stripe Balance";

/// Currency shown when Stripe reports no balance entries.
const DEFAULT_CURRENCY: &str = "USD";

const WIDGET_STYLE: &str = "margin:10px;padding:10px;background-color:#00afe1;\
                            text-align:center;font-size:16px;color:#fff;";

/// A dashboard widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    /// Widget title.
    pub title: String,
    /// HTML content.
    pub content: String,
}

/// Fetch the balance and render the widget.
///
/// A failed balance lookup still yields a widget, saying the balance is
/// unavailable.
pub async fn balance_widget(stripe: &StripeClient) -> Widget {
    let content = match stripe.retrieve_balance().await {
        Ok(balance) => render_balance(&balance),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to retrieve Stripe balance");
            format!("<div style=\"{WIDGET_STYLE}\">Stripe Balance: <b>unavailable</b></div>")
        }
    };

    Widget {
        title: WIDGET_TITLE.to_string(),
        content,
    }
}

/// Render the first available and pending balance entries.
#[must_use]
pub fn render_balance(balance: &Balance) -> String {
    let (available, available_currency) = first_entry(&balance.available);
    let (pending, pending_currency) = first_entry(&balance.pending);

    format!(
        "<div style=\"{WIDGET_STYLE}\">Stripe Balance: <b>{} {available_currency}</b> \
         <small>({} {pending_currency} Pending)</small></div>",
        format_major_units(available),
        format_major_units(pending),
    )
}

fn first_entry(entries: &[BalanceAmount]) -> (i64, String) {
    entries.first().map_or_else(
        || (0, DEFAULT_CURRENCY.to_string()),
        |entry| {
            let currency: String = entry
                .currency
                .chars()
                .filter(char::is_ascii_alphabetic)
                .collect();
            (entry.amount, currency.to_ascii_uppercase())
        },
    )
}
