//! Browser-side card tokenization script.
//!
//! The script keeps raw card numbers off the host's server: on submit it asks
//! Stripe.js for a token, appends it to the form as `stripeToken` and submits
//! again. The store-remote operation then attaches the token instead of the
//! card fields.

use stripe_gateway_core::GATEWAY_NAME;

use super::GatewayVariables;

/// Host templates that carry a card entry form.
pub const CHECKOUT_TEMPLATES: [&str; 2] = ["viewcart", "creditcard"];

/// Stripe.js location.
const STRIPE_JS_URL: &str = "https://js.stripe.com/v2/";

const SCRIPT_BODY: &str = r#"
    $('body').on('submit', 'form[name="orderfrm"], form[action="creditcard.php"]', function(e) {
        var form = $(this);
        var method = $('input[name="paymentmethod"]:checked').val();
        var useExisting = $('#useexisting').length && $('#useexisting').prop('checked');
        var ccinfoExisting = $('input[name="ccinfo"]').length && $('input[name="ccinfo"]:checked').val() == 'useexisting';
        if (useExisting || ccinfoExisting || (method && method != 'stripe')) {
            return true;
        }
        if ($('#stripeToken').length) {
            return true;
        }
        var expiry = $('#inputCardExpiry').val() || '';
        Stripe.card.createToken({
            number: $('#inputCardNumber').val(),
            cvc: $('#inputCardCvv').length ? $('#inputCardCvv').val() : $('#inputCardCVV').val(),
            exp_month: $('#inputCardExpiryYear').length ? expiry : expiry.substr(0, 2),
            exp_year: $('#inputCardExpiryYear').length ? $('#inputCardExpiryYear').val() : expiry.substr(5)
        }, function(status, response) {
            $('#cctype').val(Stripe.card.cardType($('#inputCardNumber').val()));
            form.append($('<input type="hidden" id="stripeToken" name="stripeToken" />').val(response.id));
            if (form.find('input[name="submit"]').length) {
                $('#btnCompleteOrder').click();
            } else {
                form.get(0).submit();
            }
        });
        return false;
    });"#;

/// Footer output for a client area page.
///
/// Returns the tokenization script on checkout pages when the gateway is
/// configured, and nothing elsewhere.
pub fn client_area_footer(template_file: &str, vars: &dyn GatewayVariables) -> Option<String> {
    if !CHECKOUT_TEMPLATES.contains(&template_file) {
        return None;
    }

    let settings = vars.gateway_variables(GATEWAY_NAME)?;
    tracing::debug!(template_file = %template_file, mode = settings.mode(), "Injecting checkout script");
    Some(checkout_script(settings.credentials().publishable_key))
}

/// Render the script tags for a publishable key.
#[must_use]
pub fn checkout_script(publishable_key: &str) -> String {
    format!(
        "<script type=\"text/javascript\" src=\"{STRIPE_JS_URL}\"></script>\n\
         <script type=\"text/javascript\">\n\
         (function() {{\n    Stripe.setPublishableKey('{key}');{SCRIPT_BODY}\n}})();\n\
         </script>\n",
        key = escape_js_string(publishable_key),
    )
}

/// Escape a value for a single-quoted JavaScript string inside a script tag.
fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\x3C"),
            '>' => out.push_str("\\x3E"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripe_gateway_core::GatewaySettings;

    struct Vars(Option<GatewaySettings>);

    impl GatewayVariables for Vars {
        fn gateway_variables(&self, gateway: &str) -> Option<GatewaySettings> {
            assert_eq!(gateway, "stripe");
            self.0.clone()
        }
    }

    fn vars(test_mode: bool) -> Vars {
        Vars(Some(GatewaySettings {
            test_secret_key: "sk_test_1".into(),
            test_public_key: "pk_test_1".into(),
            live_secret_key: "sk_live_1".into(),
            live_public_key: "pk_live_1".into(),
            test_mode,
        }))
    }

    #[test]
    fn script_only_on_checkout_templates() {
        let v = vars(true);
        assert!(client_area_footer("viewcart", &v).is_some());
        assert!(client_area_footer("creditcard", &v).is_some());
        assert!(client_area_footer("clientareahome", &v).is_none());
        assert!(client_area_footer("", &v).is_none());
    }

    #[test]
    fn script_uses_key_for_mode() {
        let test = client_area_footer("viewcart", &vars(true)).unwrap();
        assert!(test.contains("Stripe.setPublishableKey('pk_test_1')"));
        assert!(!test.contains("pk_live_1"));

        let live = client_area_footer("viewcart", &vars(false)).unwrap();
        assert!(live.contains("Stripe.setPublishableKey('pk_live_1')"));
        assert!(!live.contains("pk_test_1"));
    }

    #[test]
    fn script_never_contains_secret_keys() {
        let script = client_area_footer("creditcard", &vars(true)).unwrap();
        assert!(!script.contains("sk_test_1"));
        assert!(!script.contains("sk_live_1"));
    }

    #[test]
    fn unconfigured_gateway_injects_nothing() {
        assert!(client_area_footer("viewcart", &Vars(None)).is_none());
    }

    #[test]
    fn script_loads_stripe_js_and_posts_token() {
        let script = checkout_script("pk_test_1");
        assert!(script.starts_with("<script type=\"text/javascript\" src=\"https://js.stripe.com/v2/\"></script>"));
        assert!(script.contains("Stripe.card.createToken"));
        assert!(script.contains("name=\"stripeToken\""));
        assert!(script.trim_end().ends_with("</script>"));
    }

    #[test]
    fn key_is_escaped() {
        let script = checkout_script("pk_'</script><script>alert(1)");
        assert!(script.contains(r"pk_\'\x3C/script\x3E\x3Cscript\x3Ealert(1)"));
        assert_eq!(script.matches("</script>").count(), 2);
    }
}
