use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the dashboard analytics operation
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    pub city: Option<String>,
    /// `week`, `month` or `year`; anything else falls back to `month`
    pub time_range: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalyticsDto {
    pub summary: DashboardSummaryDto,
    pub breakdowns: BreakdownsDto,
    pub time_range: TimeWindowDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub total_issues: u64,
    pub resolved_issues: u64,
    pub pending_issues: u64,
    /// Percentage of issues in the window that are resolved
    pub resolution_rate: f64,
    /// Mean resolution latency in whole hours
    pub average_resolution_time: i64,
    pub total_users: u64,
    pub active_users: u64,
    /// Mean feedback rating rounded to one decimal
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BreakdownsDto {
    pub category: BTreeMap<String, u64>,
    pub priority: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeWindowDto {
    pub start: String,
    pub end: String,
}

/// Request body for the per-department performance operation
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRequest {
    pub city: Option<String>,
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetricsDto {
    pub city: String,
    pub department_metrics: BTreeMap<String, DepartmentMetricsDto>,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetricsDto {
    pub total_issues: u64,
    pub resolved_issues: u64,
    /// Mean resolution latency in whole hours
    pub average_resolution_time: i64,
}

/// Request body for exporting daily analytics snapshots
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub city: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// `csv` or `json` (default)
    pub format: Option<String>,
}

/// A stored daily analytics snapshot as exported to callers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnalyticsDto {
    pub id: String,
    pub city: String,
    /// UTC day covered by the snapshot, `YYYY-MM-DD`
    pub date: String,
    pub total_issues: i32,
    pub resolved_issues: i32,
    pub emergency_issues: i32,
    #[schema(value_type = Object)]
    pub category_breakdown: serde_json::Value,
    #[schema(value_type = Object)]
    pub priority_breakdown: serde_json::Value,
    pub generated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Only an explicit `csv` selects CSV output
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Exported payload, CSV text or the snapshot records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ExportData {
    Csv(String),
    Json(Vec<DailyAnalyticsDto>),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportDto {
    pub data: ExportData,
    pub format: ExportFormat,
}
