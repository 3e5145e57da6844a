//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here together with their utoipa path specifications,
//! which are collected into one OpenAPI document served through Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /health` - Liveness probe
/// - `POST /api/analytics/dashboard` - Dashboard analytics for a city
/// - `POST /api/analytics/performance` - Per-department performance metrics
/// - `POST /api/analytics/export` - Export daily snapshots as JSON or CSV
/// - `POST /api/notifications/bulk` - Bulk push notification
/// - `POST /api/notifications/emergency` - Emergency alert broadcast
/// - `POST /api/notifications/token` - Register the caller's device token
/// - `POST /api/users/role` - Change a user's role
/// - `GET /api/users/stats` - Caller's report statistics
/// - `POST /api/users/preferences` - Replace the caller's preferences
/// - `POST /api/events/auth/user-created` - Account created trigger
/// - `POST /api/events/auth/user-deleted` - Account deleted trigger
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let state = startup::build_state(&config, db)?;
/// let router = routes().with_state(state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "civicwatch", description = "Civic issue reporting backend API"), tags(
        (name = controller::analytics::ANALYTICS_TAG, description = "Issue analytics and snapshot export"),
        (name = controller::notification::NOTIFICATION_TAG, description = "Push notifications and emergency alerts"),
        (name = controller::user::USER_TAG, description = "User roles, statistics and preferences"),
        (name = controller::event::EVENT_TAG, description = "Account lifecycle triggers from the auth provider"),
        (name = controller::health::HEALTH_TAG, description = "Service health"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::health))
        .routes(routes!(controller::analytics::get_dashboard_analytics))
        .routes(routes!(controller::analytics::get_performance_metrics))
        .routes(routes!(controller::analytics::export_analytics_data))
        .routes(routes!(controller::notification::send_bulk_notification))
        .routes(routes!(controller::notification::send_emergency_alert))
        .routes(routes!(controller::notification::update_fcm_token))
        .routes(routes!(controller::user::update_user_role))
        .routes(routes!(controller::user::get_user_stats))
        .routes(routes!(controller::user::update_user_preferences))
        .routes(routes!(controller::event::user_created))
        .routes(routes!(controller::event::user_deleted))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
