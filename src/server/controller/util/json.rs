use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::{request::RequestError, Error};

/// JSON request body whose rejections render as `invalid-argument`.
///
/// Axum's own [`Json`] extractor answers malformed bodies with a plain-text 4xx; callers of
/// this API always receive the `{code, error}` body instead.
pub struct CallableJson<T>(pub T);

impl<S, T> FromRequest<S> for CallableJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| RequestError::invalid(rejection.body_text()))?;

        Ok(Self(value))
    }
}
