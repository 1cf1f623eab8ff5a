//! Input checks shared by the services. Every failure is a
//! [`DomainError::Validation`] raised before the store is touched.

use chrono::NaiveDate;

use super::errors::DomainError;

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::validation(format!("{} must be a valid date in YYYY-MM-DD format", field)))
}

/// Trimmed, non-empty text no longer than `max_len` characters
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text, with blank input collapsing to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Measurements are optional but must be finite and positive when present
pub fn positive_measurement(field: &str, value: Option<f64>) -> Result<Option<f64>, DomainError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(DomainError::validation(format!(
            "{} must be a positive number",
            field
        ))),
        other => Ok(other),
    }
}
