//! Account lifecycle triggers delivered by the auth provider.
//!
//! The event source does not act on failures, so handlers log them and acknowledge the
//! delivery regardless.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::AuthAccountDto,
    },
    server::{
        controller::util::{CallableJson, EventSource},
        model::app::AppState,
        service::user::UserService,
    },
};

pub static EVENT_TAG: &str = "events";

/// Create the profile for a newly registered account
#[utoipa::path(
    post,
    path = "/api/events/auth/user-created",
    tag = EVENT_TAG,
    request_body = AuthAccountDto,
    responses(
        (status = 200, description = "Event acknowledged", body = MessageDto),
        (status = 400, description = "Malformed account record", body = ErrorDto),
        (status = 401, description = "Missing or wrong event secret", body = ErrorDto)
    ),
)]
pub async fn user_created(
    State(state): State<AppState>,
    _source: EventSource,
    CallableJson(account): CallableJson<AuthAccountDto>,
) -> Json<MessageDto> {
    let uid = account.uid.clone();

    if let Err(err) = UserService::new(&state.db, state.auth.as_ref())
        .handle_user_created(account)
        .await
    {
        tracing::error!(uid = %uid, "Failed to create user profile: {}", err);
    }

    Json(MessageDto::success("Account creation processed"))
}

/// Remove the profile of a deleted account and anonymize its issues
#[utoipa::path(
    post,
    path = "/api/events/auth/user-deleted",
    tag = EVENT_TAG,
    request_body = AuthAccountDto,
    responses(
        (status = 200, description = "Event acknowledged", body = MessageDto),
        (status = 400, description = "Malformed account record", body = ErrorDto),
        (status = 401, description = "Missing or wrong event secret", body = ErrorDto)
    ),
)]
pub async fn user_deleted(
    State(state): State<AppState>,
    _source: EventSource,
    CallableJson(account): CallableJson<AuthAccountDto>,
) -> Json<MessageDto> {
    if let Err(err) = UserService::new(&state.db, state.auth.as_ref())
        .handle_user_deleted(&account.uid, Utc::now())
        .await
    {
        tracing::error!(uid = %account.uid, "Failed to remove user data: {}", err);
    }

    Json(MessageDto::success("Account deletion processed"))
}
