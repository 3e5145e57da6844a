use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// Machine readable error code, e.g. `permission-denied`
    pub code: String,
    /// The error message
    pub error: String,
}

/// Generic acknowledgement for operations without a richer result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub success: bool,
    pub message: String,
}

impl MessageDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response of the health check endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    pub version: String,
}
