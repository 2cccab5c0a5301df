//! Field rules for customer records.
//!
//! Character columns are `VARCHAR(50)` in the schema; these checks reject
//! bad input with a readable message before it reaches the database.

use validator::ValidateLength;

use crate::error::CoreError;

/// Maximum length (in characters) of every bounded text column.
pub const MAX_CHAR_LEN: u64 = 50;

/// Status message shown for an active customer.
pub const STATUS_ACTIVE: &str = "Customer active";
/// Status message shown for an inactive customer.
pub const STATUS_INACTIVE: &str = "Customer not active";

/// Validate a bounded text field: non-blank and at most [`MAX_CHAR_LEN`] characters.
pub fn validate_char_field(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if !value.validate_length(None, Some(MAX_CHAR_LEN), None) {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_CHAR_LEN} characters"
        )));
    }
    Ok(())
}

/// Like [`validate_char_field`] but passes when the value is absent.
pub fn validate_optional_char_field(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_char_field(field, v),
        None => Ok(()),
    }
}

/// Human-readable status for a customer's `active` flag.
pub fn customer_status_message(active: bool) -> &'static str {
    if active {
        STATUS_ACTIVE
    } else {
        STATUS_INACTIVE
    }
}
