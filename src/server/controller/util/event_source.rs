use axum::{extract::FromRequestParts, http::request::Parts};

use crate::server::{
    error::{auth::AuthError, Error},
    model::app::AppState,
};

/// Header carrying the shared secret on account event deliveries.
pub const EVENT_SECRET_HEADER: &str = "x-auth-event-secret";

/// Marker extractor for requests delivered by the auth provider.
///
/// Rejects the request unless [`EVENT_SECRET_HEADER`] matches the configured secret.
pub struct EventSource;

impl FromRequestParts<AppState> for EventSource {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let secret = parts
            .headers
            .get(EVENT_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        match secret {
            Some(secret) if secret == &*state.event_secret => Ok(Self),
            _ => Err(AuthError::InvalidEventSecret.into()),
        }
    }
}
