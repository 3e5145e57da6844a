use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{error::error_response, model::auth::Permission};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User must be authenticated")]
    Unauthenticated,
    #[error("{}", .0.denied_message())]
    PermissionDenied(Permission),
    #[error("Invalid account event secret")]
    InvalidEventSecret,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated | Self::InvalidEventSecret => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, "unauthenticated", self.to_string())
            }
            Self::PermissionDenied(permission) => {
                tracing::debug!(permission = ?permission, "{}", self);

                error_response(StatusCode::FORBIDDEN, "permission-denied", self.to_string())
            }
        }
    }
}
