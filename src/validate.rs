//! Input validation for command-line identifiers

use crate::error::{Result, SiteWiseError};
use uuid::Uuid;

/// Returns true when `value` parses as a UUID
pub fn valid_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Parse a UUID argument, naming the argument in the error
pub fn require_uuid(label: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| SiteWiseError::InvalidInput(format!("Invalid {}: '{}' ({})", label, value, e)))
}
