//! Error types for the civicwatch server.
//!
//! Domain errors (authentication, request validation, configuration, external providers)
//! are separate `thiserror` enums aggregated into [`Error`]. Every error implements
//! `IntoResponse` so handlers can return `Result<_, Error>` and callers always receive a
//! structured `{code, error}` body instead of a raw failure.

pub mod auth;
pub mod config;
pub mod provider;
pub mod request;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, provider::ProviderError, request::RequestError,
    },
};

/// Main error type for the civicwatch server.
///
/// Uses `#[from]` so repositories, providers and services can propagate with `?`.
/// Caller-facing variants (auth, request) map to their own status codes; everything else
/// is logged and reported as a generic internal error.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Caller is unauthenticated or lacks the role for the operation.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Caller supplied missing or malformed fields, or referenced a missing record.
    #[error(transparent)]
    RequestError(#[from] RequestError),
    /// External auth or push provider failure.
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in civicwatch's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// Socket or server I/O error.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::RequestError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds the JSON error body shared by every error response.
pub(crate) fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            code: code.to_string(),
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message so implementation details are not
/// leaked to callers.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Internal server error",
        )
    }
}
