use axum::{extract::State, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{UpdatePreferencesRequest, UpdateRoleRequest, UserStatsDto},
    },
    server::{
        controller::util::CallableJson,
        error::Error,
        model::{app::AppState, auth::Caller},
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "users";

/// Change a user's role
///
/// Updates the role claim with the auth provider first, then the stored profile.
#[utoipa::path(
    post,
    path = "/api/users/role",
    tag = USER_TAG,
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = MessageDto),
        (status = 400, description = "Fields missing or unknown role", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 404, description = "User profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<UpdateRoleRequest>,
) -> Result<Json<MessageDto>, Error> {
    let result = UserService::new(&state.db, state.auth.as_ref())
        .update_user_role(&caller, request)
        .await?;

    Ok(Json(result))
}

/// Recompute and return the caller's report statistics
#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current statistics", body = UserStatsDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 404, description = "User profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_stats(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<UserStatsDto>, Error> {
    let stats = UserService::new(&state.db, state.auth.as_ref())
        .get_user_stats(&caller)
        .await?;

    Ok(Json(stats))
}

/// Replace the caller's preferences
#[utoipa::path(
    post,
    path = "/api/users/preferences",
    tag = USER_TAG,
    request_body = UpdatePreferencesRequest,
    responses(
        (status = 200, description = "Preferences stored", body = MessageDto),
        (status = 400, description = "Preferences missing", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 404, description = "User profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_preferences(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<UpdatePreferencesRequest>,
) -> Result<Json<MessageDto>, Error> {
    let result = UserService::new(&state.db, state.auth.as_ref())
        .update_user_preferences(&caller, request)
        .await?;

    Ok(Json(result))
}
