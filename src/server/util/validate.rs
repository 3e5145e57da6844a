//! Required-field checks for request bodies.

use crate::server::error::request::RequestError;

/// Returns the value when present and not blank.
pub fn required(value: Option<String>, message: &str) -> Result<String, RequestError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RequestError::invalid(message)),
    }
}
