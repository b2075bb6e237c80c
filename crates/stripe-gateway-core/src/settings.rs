//! Gateway settings and the configuration declaration shown in the host's
//! admin UI.

use serde::{Deserialize, Deserializer, Serialize};

/// Name under which the host platform knows this gateway.
pub const GATEWAY_NAME: &str = "stripe";

/// Human-readable gateway name.
pub const DISPLAY_NAME: &str = "Stripe";

/// Host module API version implemented by the gateway.
pub const MODULE_API_VERSION: &str = "1.1";

/// Configured values for the gateway, as stored by the host platform.
///
/// Field names follow the host's parameter bag (`testSecretKey`, ...).
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySettings {
    /// Secret key used in test mode (`sk_test_...`).
    #[serde(default)]
    pub test_secret_key: String,
    /// Publishable key used in test mode (`pk_test_...`).
    #[serde(default)]
    pub test_public_key: String,
    /// Secret key used in live mode (`sk_live_...`).
    #[serde(default)]
    pub live_secret_key: String,
    /// Publishable key used in live mode (`pk_live_...`).
    #[serde(default)]
    pub live_public_key: String,
    /// Whether test mode is enabled.
    #[serde(default, deserialize_with = "deserialize_yes_no")]
    pub test_mode: bool,
}

impl std::fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("test_secret_key", &redact(&self.test_secret_key))
            .field("test_public_key", &self.test_public_key)
            .field("live_secret_key", &redact(&self.live_secret_key))
            .field("live_public_key", &self.live_public_key)
            .field("test_mode", &self.test_mode)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// The key pair in effect for the current mode.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    /// Secret key for server-side API calls.
    pub secret_key: &'a str,
    /// Publishable key for the browser tokenization script.
    pub publishable_key: &'a str,
}

impl GatewaySettings {
    /// Select the credential pair for the configured mode.
    ///
    /// Test mode yields the test pair and live mode the live pair; keys from
    /// the two pairs are never mixed.
    #[must_use]
    pub fn credentials(&self) -> Credentials<'_> {
        if self.test_mode {
            Credentials {
                secret_key: &self.test_secret_key,
                publishable_key: &self.test_public_key,
            }
        } else {
            Credentials {
                secret_key: &self.live_secret_key,
                publishable_key: &self.live_public_key,
            }
        }
    }

    /// The mode name, for logging.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        if self.test_mode {
            "test"
        } else {
            "live"
        }
    }
}

/// Interpret the host's yes/no field encoding.
///
/// The host stores a ticked checkbox as `"on"` and an unticked one as an
/// empty string. Only `"on"` is ticked.
#[must_use]
pub fn parse_yes_no(value: &str) -> bool {
    value == "on"
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YesNo {
    Bool(bool),
    Text(String),
}

/// Deserialize a yes/no field sent as a JSON boolean or the host's string
/// encoding. `null` counts as unticked.
///
/// # Errors
///
/// Fails on values that are neither booleans nor strings.
pub fn deserialize_yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<YesNo>::deserialize(deserializer)? {
        Some(YesNo::Bool(b)) => b,
        Some(YesNo::Text(s)) => parse_yes_no(&s),
        None => false,
    })
}

/// Module metadata consumed by the host platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleMetadata {
    /// Display name.
    pub display_name: &'static str,
    /// Host module API version.
    #[serde(rename = "APIVersion")]
    pub api_version: &'static str,
    /// Whether the host should hide its own card entry form.
    pub disable_local_credit_card_input: bool,
    /// Whether cards are stored remotely as tokens.
    pub tokenised_storage: bool,
}

/// Return the module metadata block.
#[must_use]
pub fn metadata() -> ModuleMetadata {
    ModuleMetadata {
        display_name: DISPLAY_NAME,
        api_version: MODULE_API_VERSION,
        disable_local_credit_card_input: false,
        tokenised_storage: true,
    }
}

/// Admin UI field types understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Fixed system value, not editable.
    System,
    /// Single-line text input.
    #[serde(rename = "text")]
    Text,
    /// Checkbox.
    #[serde(rename = "yesno")]
    YesNo,
}

/// A single configuration field declaration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigField {
    /// Setting key in the parameter bag.
    #[serde(skip)]
    pub key: &'static str,
    /// Label shown to administrators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<&'static str>,
    /// Field type.
    #[serde(rename = "Type")]
    pub field_type: FieldType,
    /// Fixed value for system fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'static str>,
    /// Input width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl ConfigField {
    const fn key_field(key: &'static str, friendly_name: &'static str) -> Self {
        Self {
            key,
            friendly_name: Some(friendly_name),
            field_type: FieldType::Text,
            value: None,
            size: Some("40"),
            default: Some(""),
            description: Some(""),
        }
    }
}

/// The ordered configuration declaration for the admin UI.
#[must_use]
pub fn config_fields() -> Vec<ConfigField> {
    vec![
        ConfigField {
            key: "FriendlyName",
            friendly_name: None,
            field_type: FieldType::System,
            value: Some(DISPLAY_NAME),
            size: None,
            default: None,
            description: None,
        },
        ConfigField::key_field("testSecretKey", "Test Secret Key"),
        ConfigField::key_field("testPublicKey", "Test Public Key"),
        ConfigField::key_field("liveSecretKey", "Live Secret Key"),
        ConfigField::key_field("livePublicKey", "Live Public Key"),
        ConfigField {
            key: "testMode",
            friendly_name: Some("Test Mode"),
            field_type: FieldType::YesNo,
            value: None,
            size: None,
            default: None,
            description: Some("Tick to enable test mode"),
        },
    ]
}
