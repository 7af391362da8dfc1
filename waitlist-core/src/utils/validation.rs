//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits follow the restaurant record (name ≤ 30 chars) and
//! reasonable UX limits for review text.

use crate::core::{ServiceError, ServiceResult};

// ── Text length limits ──────────────────────────────────────────────

/// Restaurant display names
pub const MAX_RESTAURANT_NAME_LEN: usize = 30;

/// Menu item named in a review
pub const MAX_MENU_LEN: usize = 100;

/// Review body
pub const MAX_CONTENTS_LEN: usize = 2000;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Star range ──────────────────────────────────────────────────────

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that a string, possibly empty, is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> ServiceResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ServiceError::InvalidInput(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate a star rating
pub fn validate_stars(stars: i32) -> ServiceResult<()> {
    if !(MIN_STARS..=MAX_STARS).contains(&stars) {
        return Err(ServiceError::InvalidInput(format!(
            "stars must be between {MIN_STARS} and {MAX_STARS}, got {stars}"
        )));
    }
    Ok(())
}

/// Validate WGS84 coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ServiceResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ServiceError::InvalidInput(format!("invalid latitude: {latitude}")));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ServiceError::InvalidInput(format!("invalid longitude: {longitude}")));
    }
    Ok(())
}

/// Normalize a phone number to bare digits
///
/// Separators (space, `-`, `.`, parentheses) are dropped; anything else that
/// is not an ASCII digit is rejected, as is a digit count other than `digits`.
pub fn normalize_phone(raw: &str, digits: usize) -> ServiceResult<String> {
    let mut normalized = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            '0'..='9' => normalized.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => {
                return Err(ServiceError::InvalidInput(format!(
                    "phone number contains invalid character '{c}'"
                )));
            }
        }
    }
    if normalized.len() != digits {
        return Err(ServiceError::InvalidInput(format!(
            "phone number must have {digits} digits, got {}",
            normalized.len()
        )));
    }
    Ok(normalized)
}
