use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for changing a user's role
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub user_id: Option<String>,
    /// `citizen`, `authority` or `admin`
    pub new_role: Option<String>,
}

/// Freshly recomputed statistics for the calling user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsDto {
    pub total_reports: u64,
    pub resolved_reports: u64,
    pub feedback_given: u64,
    pub resolution_rate: f64,
    pub city: String,
    pub join_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesDto {
    pub push_enabled: bool,
    pub email_enabled: bool,
    pub whatsapp_enabled: bool,
    pub alerts: bool,
}

impl Default for NotificationPreferencesDto {
    fn default() -> Self {
        Self {
            push_enabled: true,
            email_enabled: true,
            whatsapp_enabled: false,
            alerts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    pub language: String,
    pub theme: String,
    pub notifications: NotificationPreferencesDto,
}

impl Default for PreferencesDto {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            theme: "system".to_string(),
            notifications: NotificationPreferencesDto::default(),
        }
    }
}

/// Request body for replacing the caller's preferences
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub preferences: Option<PreferencesDto>,
}

/// Account record delivered by the auth provider when an account is created or deleted
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthAccountDto {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}
