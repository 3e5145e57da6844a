use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        notification::{
            BulkNotificationDto, BulkNotificationRequest, EmergencyAlertDto,
            EmergencyAlertRequest, UpdateTokenRequest,
        },
    },
    server::{
        controller::util::CallableJson,
        error::Error,
        model::{app::AppState, auth::Caller},
        service::{notification::NotificationService, user::UserService},
    },
};

pub static NOTIFICATION_TAG: &str = "notifications";

/// Push a notification to every opted-in user of an audience
///
/// # Responses
/// - 200 (Success): Dispatch finished, with the number of successful deliveries
/// - 400 (Bad Request): Title or body missing
/// - 401 (Unauthorized): Missing or invalid bearer token
/// - 403 (Forbidden): Caller is not an admin
/// - 500 (Internal Server Error): Recipients could not be loaded
#[utoipa::path(
    post,
    path = "/api/notifications/bulk",
    tag = NOTIFICATION_TAG,
    request_body = BulkNotificationRequest,
    responses(
        (status = 200, description = "Bulk notification dispatched", body = BulkNotificationDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_bulk_notification(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<BulkNotificationRequest>,
) -> Result<Json<BulkNotificationDto>, Error> {
    let result = NotificationService::new(&state.db, state.push.as_ref())
        .send_bulk_notification(&caller, request, Utc::now())
        .await?;

    Ok(Json(result))
}

/// Store an emergency alert and broadcast it to opted-in users of the city
#[utoipa::path(
    post,
    path = "/api/notifications/emergency",
    tag = NOTIFICATION_TAG,
    request_body = EmergencyAlertRequest,
    responses(
        (status = 200, description = "Emergency alert stored and dispatched", body = EmergencyAlertDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_emergency_alert(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<EmergencyAlertRequest>,
) -> Result<Json<EmergencyAlertDto>, Error> {
    let result = NotificationService::new(&state.db, state.push.as_ref())
        .send_emergency_alert(&caller, request, Utc::now())
        .await?;

    Ok(Json(result))
}

/// Register the caller's push device token
#[utoipa::path(
    post,
    path = "/api/notifications/token",
    tag = NOTIFICATION_TAG,
    request_body = UpdateTokenRequest,
    responses(
        (status = 200, description = "Token stored", body = MessageDto),
        (status = 400, description = "Token missing", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 404, description = "Caller has no profile", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_fcm_token(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<UpdateTokenRequest>,
) -> Result<Json<MessageDto>, Error> {
    let result = UserService::new(&state.db, state.auth.as_ref())
        .update_fcm_token(&caller, request.token, Utc::now())
        .await?;

    Ok(Json(result))
}
