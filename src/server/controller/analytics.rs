use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    model::{
        analytics::{
            DashboardAnalyticsDto, DashboardRequest, ExportDto, ExportRequest,
            PerformanceMetricsDto, PerformanceRequest,
        },
        api::ErrorDto,
    },
    server::{
        controller::util::CallableJson,
        error::Error,
        model::{app::AppState, auth::Caller},
        service::analytics::AnalyticsService,
    },
};

pub static ANALYTICS_TAG: &str = "analytics";

/// Issue analytics for one city over a trailing window
///
/// # Responses
/// - 200 (Success): Summary counters, category and priority histograms, window bounds
/// - 400 (Bad Request): City missing or malformed body
/// - 401 (Unauthorized): Missing or invalid bearer token
/// - 403 (Forbidden): Caller is not an authority or admin
/// - 500 (Internal Server Error): Database failure
#[utoipa::path(
    post,
    path = "/api/analytics/dashboard",
    tag = ANALYTICS_TAG,
    request_body = DashboardRequest,
    responses(
        (status = 200, description = "Dashboard analytics for the city", body = DashboardAnalyticsDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard_analytics(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<DashboardRequest>,
) -> Result<Json<DashboardAnalyticsDto>, Error> {
    let analytics = AnalyticsService::new(&state.db)
        .get_dashboard_analytics(&caller, request, Utc::now())
        .await?;

    Ok(Json(analytics))
}

/// Per-department issue counts and resolution latency for one city
#[utoipa::path(
    post,
    path = "/api/analytics/performance",
    tag = ANALYTICS_TAG,
    request_body = PerformanceRequest,
    responses(
        (status = 200, description = "Department metrics for the city", body = PerformanceMetricsDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_performance_metrics(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<PerformanceRequest>,
) -> Result<Json<PerformanceMetricsDto>, Error> {
    let metrics = AnalyticsService::new(&state.db)
        .get_performance_metrics(&caller, request, Utc::now())
        .await?;

    Ok(Json(metrics))
}

/// Daily snapshots of a city within a date range, as JSON records or CSV text
#[utoipa::path(
    post,
    path = "/api/analytics/export",
    tag = ANALYTICS_TAG,
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Exported snapshots", body = ExportDto),
        (status = 400, description = "Invalid request", body = ErrorDto),
        (status = 401, description = "Unauthenticated", body = ErrorDto),
        (status = 403, description = "Permission denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_analytics_data(
    State(state): State<AppState>,
    caller: Caller,
    CallableJson(request): CallableJson<ExportRequest>,
) -> Result<Json<ExportDto>, Error> {
    let export = AnalyticsService::new(&state.db)
        .export_analytics_data(&caller, request)
        .await?;

    Ok(Json(export))
}
