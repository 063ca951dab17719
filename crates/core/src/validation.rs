//! Input normalization and the form rules every handler re-validates.
//!
//! The browser validates these too, but nothing stops a client from skipping
//! it, so each rule is enforced again before anything is written.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Domain of the synthetic login address.
pub const SYNTHETIC_EMAIL_DOMAIN: &str = "local.auth";

/// Minimum password length for creation, reset and change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum trimmed length of a showroom name.
pub const MIN_SHOWROOM_NAME_LENGTH: usize = 3;

/// Supported UI languages.
pub const LANGUAGES: &[&str] = &["EN", "FR"];

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._-]{3,32}$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Trim and lower-case a username, then check its shape.
pub fn normalize_username(username: &str) -> Result<String, CoreError> {
    let normalized = username.trim().to_lowercase();
    if !USERNAME_RE.is_match(&normalized) {
        return Err(CoreError::Validation(
            "Username must be 3-32 characters of a-z, 0-9, '.', '_' or '-'".into(),
        ));
    }
    Ok(normalized)
}

/// The login identifier for a username: `<username>@local.auth`.
pub fn synthetic_email(username: &str) -> String {
    format!("{}@{SYNTHETIC_EMAIL_DOMAIN}", username.trim().to_lowercase())
}

/// Enforce the minimum password length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Validate a language preference (`EN` or `FR`).
pub fn validate_language(language: &str) -> Result<(), CoreError> {
    if LANGUAGES.contains(&language) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid language '{language}'. Must be one of: {LANGUAGES:?}"
        )))
    }
}

/// Clamp a discount ceiling to `[0, 100]`. Non-finite input becomes 0.
pub fn clamp_discount(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Generic text helpers
// ---------------------------------------------------------------------------

/// Trim a value and collapse blanks to `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Require a non-blank value, returning it trimmed.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Require a trimmed value of at least `min` characters.
pub fn require_min_len(field: &str, value: &str, min: usize) -> Result<String, CoreError> {
    let trimmed = require_text(field, value)?;
    if trimmed.chars().count() < min {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate an optional email address. Blank input is treated as absent.
pub fn validate_optional_email(email: Option<String>) -> Result<Option<String>, CoreError> {
    match blank_to_none(email) {
        Some(e) if !EMAIL_RE.is_match(&e) => {
            Err(CoreError::Validation("Invalid email address".into()))
        }
        other => Ok(other),
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Item type codes are upper-case with whitespace runs replaced by `_`.
pub fn normalize_item_type_code(code: &str) -> String {
    code.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Brand names created from the intake form are trimmed and upper-cased.
pub fn normalize_brand_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Showroom names must be at least three characters once trimmed.
pub fn validate_showroom_name(name: &str) -> Result<String, CoreError> {
    require_min_len("Showroom name", name, MIN_SHOWROOM_NAME_LENGTH)
}

/// Prices and amounts may not be negative.
pub fn validate_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!("{field} must be zero or more")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// Customer-facing tracking PINs are exactly four digits.
pub fn validate_tracking_pin(pin: &str) -> Result<(), CoreError> {
    if !PIN_RE.is_match(pin) {
        return Err(CoreError::Validation("Tracking password must be 4 digits".into()));
    }
    Ok(())
}

/// Fields of the intake form checked before the transaction starts.
#[derive(Debug, Clone, Copy)]
pub struct IntakeFields<'a> {
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub model: &'a str,
    pub reported_problem: &'a str,
    pub intake_condition: &'a str,
    pub tracking_pin: Option<&'a str>,
}

/// Apply the intake rules in form order, reporting the first failure.
pub fn validate_intake(fields: IntakeFields<'_>) -> Result<(), CoreError> {
    require_min_len("Customer name", fields.customer_name, 2)?;
    require_text("Customer phone", fields.customer_phone)?;
    require_min_len("Model", fields.model, 2)?;
    require_min_len("Reported problem", fields.reported_problem, 10)?;
    require_min_len("Intake condition", fields.intake_condition, 5)?;
    if let Some(pin) = fields.tracking_pin {
        validate_tracking_pin(pin)?;
    }
    Ok(())
}
