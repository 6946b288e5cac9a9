//! Price parsing, validation, and override resolution.
//!
//! Prices arrive from clients either as JSON numbers or as numeric strings
//! and are normalised into exact [`Price`] decimals. Two input flavours
//! exist:
//!
//! - a *required* price (vendor overrides): `null` and `""` are rejected;
//! - an *optional* price (category defaults): `null` and `""` clear it.
//!
//! `0` is always a real price, never "unset".

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::Price;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of fractional digits accepted (column is `NUMERIC(12,2)`).
pub const MAX_PRICE_SCALE: u32 = 2;

/// Maximum number of integer digits accepted (column is `NUMERIC(12,2)`).
pub const MAX_PRICE_INTEGER_DIGITS: u32 = 10;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a required price from raw JSON input.
pub fn parse_price(raw: &serde_json::Value) -> Result<Price, CoreError> {
    parse_optional_price(raw)?
        .ok_or_else(|| CoreError::Validation("Valid price is required".to_string()))
}

/// Parse an optional price from raw JSON input.
///
/// Returns `Ok(None)` for `null` and for empty/whitespace strings.
pub fn parse_optional_price(raw: &serde_json::Value) -> Result<Option<Price>, CoreError> {
    let text = match raw {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.to_string()
        }
        other => {
            return Err(CoreError::Validation(format!(
                "Price must be a number or numeric string, got {other}"
            )))
        }
    };

    // `Decimal::from_str` also accepts `_` digit separators; plain numbers only.
    if let Some(bad) = text
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
    {
        return Err(CoreError::Validation(format!(
            "Valid price is required, got '{text}' (unexpected '{bad}')"
        )));
    }

    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| CoreError::Validation(format!("Valid price is required, got '{text}'")))?;

    validate_price(price).map(Some)
}

/// Validate that a price is non-negative and fits `NUMERIC(12,2)`.
pub fn validate_price(price: Price) -> Result<Price, CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation(format!(
            "Price must not be negative, got {price}"
        )));
    }

    let normalized = price.normalize();
    if normalized.scale() > MAX_PRICE_SCALE {
        return Err(CoreError::Validation(format!(
            "Price must have at most {MAX_PRICE_SCALE} decimal places, got {price}"
        )));
    }

    let limit = Decimal::from(10_i64.pow(MAX_PRICE_INTEGER_DIGITS));
    if normalized >= limit {
        return Err(CoreError::Validation(format!(
            "Price must be less than {limit}, got {price}"
        )));
    }

    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The price a vendor charges for a category: the override when present,
/// otherwise the category default. Both may be absent.
pub fn resolve_vendor_price(override_price: Option<Price>, default_price: Option<Price>) -> Option<Price> {
    override_price.or(default_price)
}
