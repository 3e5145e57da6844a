use axum::Json;
use chrono::Utc;

use crate::model::api::HealthDto;

pub static HEALTH_TAG: &str = "health";

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is up", body = HealthDto)
    ),
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
