use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for a bulk push notification
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkNotificationRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    /// `all`, `citizens` or `authorities`; anything else targets everyone
    pub target_audience: Option<String>,
    pub city: Option<String>,
    /// Extra key/value pairs delivered with the notification
    pub data: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkNotificationDto {
    pub success: bool,
    pub message: String,
    pub sent_count: u64,
    pub total_targeted: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body for an emergency alert broadcast
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlertRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub city: Option<String>,
    /// Broadcast radius around `location`, defaults to 10 km
    pub radius_km: Option<f64>,
    pub location: Option<LocationDto>,
    /// Defaults to `high`
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlertDto {
    pub success: bool,
    pub message: String,
    pub alert_id: i32,
    pub sent_count: u64,
    pub total_targeted: u64,
}

/// Request body for registering a push device token
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenRequest {
    pub token: Option<String>,
}
