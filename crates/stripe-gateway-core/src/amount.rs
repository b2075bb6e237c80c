//! Amount handling.
//!
//! The host platform works in major units (`12.34`), the processor in minor
//! units (`1234`). All conversions go through this module.

use serde::{Deserialize, Deserializer};

use crate::error::GatewayError;

/// Convert a major-unit amount to minor units, rounding to the nearest unit.
///
/// # Errors
///
/// Returns `GatewayError::InvalidAmount` if the amount is not finite or does
/// not fit in an `i64` after scaling.
#[allow(clippy::cast_possible_truncation)]
pub fn to_minor_units(amount: f64) -> Result<i64, GatewayError> {
    let scaled = (amount * 100.0).round();
    if !scaled.is_finite() || scaled.abs() >= 9.0e18 {
        return Err(GatewayError::InvalidAmount(amount.to_string()));
    }
    Ok(scaled as i64)
}

/// Render a minor-unit amount as major units with two decimals and `,`
/// thousands separators (`123456` becomes `1,234.56`).
#[must_use]
pub fn format_major_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let whole = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{cents:02}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn parse_raw(raw: RawAmount) -> Result<Option<f64>, String> {
    match raw {
        RawAmount::Number(n) => Ok(Some(n)),
        RawAmount::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("invalid amount: {trimmed}"))
        }
    }
}

/// Deserialize an amount sent either as a JSON number or a numeric string.
///
/// # Errors
///
/// Fails on empty or non-numeric strings.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    parse_raw(raw)
        .map_err(serde::de::Error::custom)?
        .ok_or_else(|| serde::de::Error::custom("amount is required"))
}

/// Like [`deserialize_amount`], but an absent, null or empty value is `None`.
///
/// # Errors
///
/// Fails on non-numeric strings.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        Some(raw) => parse_raw(raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
