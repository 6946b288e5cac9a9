//! Vendor field rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle states a vendor can be in.
pub const VENDOR_STATUSES: &[&str] = &["Pending", "Accepted", "Rejected"];

/// Status assigned to newly onboarded vendors.
pub const DEFAULT_VENDOR_STATUS: &str = "Pending";

pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 20;

/// Normalise a status to its canonical spelling (case-insensitive match).
pub fn validate_vendor_status(status: &str) -> Result<&'static str, CoreError> {
    let trimmed = status.trim();
    VENDOR_STATUSES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid vendor status '{trimmed}'. Must be one of: {}",
                VENDOR_STATUSES.join(", ")
            ))
        })
}

/// Validate a phone number and return it trimmed.
///
/// Digits plus an optional leading `+`, with spaces, dashes and parentheses
/// allowed as separators.
pub fn validate_phone(phone: &str) -> Result<String, CoreError> {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if let Some(bad) = body
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')')))
    {
        return Err(CoreError::Validation(format!(
            "Phone number contains invalid character '{bad}'"
        )));
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "Phone number must have between {MIN_PHONE_DIGITS} and {MAX_PHONE_DIGITS} digits"
        )));
    }

    Ok(trimmed.to_string())
}

/// A map position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Validate a location update.
///
/// Both coordinates absent clears the location (`Ok(None)`); exactly one
/// present is an error.
pub fn validate_location(lat: Option<f64>, lng: Option<f64>) -> Result<Option<GeoPoint>, CoreError> {
    let (lat, lng) = match (lat, lng) {
        (None, None) => return Ok(None),
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(CoreError::Validation(
                "Both lat and lng are required".to_string(),
            ))
        }
    };
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoreError::Validation(format!(
            "Latitude must be between -90 and 90, got {lat}"
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CoreError::Validation(format!(
            "Longitude must be between -180 and 180, got {lng}"
        )));
    }
    Ok(Some(GeoPoint { lat, lng }))
}
