//! Caller input errors.
//!
//! These are the caller's fault and are reported back verbatim with a 4xx status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum RequestError {
    /// A required field is missing or a field could not be parsed.
    #[error("{0}")]
    InvalidArgument(String),
    /// The record the operation targets does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl RequestError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::InvalidArgument(message) => {
                error_response(StatusCode::BAD_REQUEST, "invalid-argument", message)
            }
            Self::NotFound(message) => error_response(StatusCode::NOT_FOUND, "not-found", message),
        }
    }
}
