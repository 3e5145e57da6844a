//! External provider error types.
//!
//! Failures talking to the push messaging service or the auth provider's admin API. They
//! are never the caller's fault and render as internal errors.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The push provider rejected an entire batch.
    #[error("Push provider rejected request with status {status}: {message}")]
    PushRejected { status: u16, message: String },
    /// The auth provider rejected a custom claims update.
    #[error("Auth provider rejected claims update for {uid} with status {status}")]
    ClaimsRejected { uid: String, status: u16 },
    /// Transport level failure.
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
