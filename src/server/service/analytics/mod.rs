//! Issue analytics.
//!
//! On-demand dashboard and per-department reports scan raw issue records. The scheduled
//! daily job condenses each city's previous day into a snapshot row, and the export
//! operation reads those snapshots back as JSON records or CSV text.

pub mod aggregate;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde_json::{json, Map, Value};

use crate::{
    model::analytics::{
        BreakdownsDto, DailyAnalyticsDto, DashboardAnalyticsDto, DashboardRequest,
        DashboardSummaryDto, DepartmentMetricsDto, ExportData, ExportDto, ExportFormat,
        ExportRequest, PerformanceMetricsDto, PerformanceRequest, TimeWindowDto,
    },
    server::{
        data::{
            civic_user::CivicUserRepository, daily_analytics::DailyAnalyticsRepository,
            issue::IssueRepository,
        },
        error::{request::RequestError, Error},
        model::{
            analytics::TimeRange,
            auth::{authorize, Caller, Permission},
            db::DailyAnalyticsModel,
        },
        service::analytics::aggregate::{department_metrics, IssueMetrics},
        util::{
            csv::records_to_csv,
            time::{parse_request_date, previous_utc_day, to_rfc3339, utc_day_bounds},
            validate::required,
        },
    },
};

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    /// Creates a new instance of [`AnalyticsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Summarizes a city's issues and user engagement over a look-back window.
    ///
    /// # Arguments
    /// - `caller` - Must hold [`Permission::ViewDashboard`]
    /// - `request` - City (required) and optional time range, defaulting to a month
    /// - `now` - End of the window
    ///
    /// # Returns
    /// - `Ok(DashboardAnalyticsDto)` - Summary, histograms and window bounds
    /// - `Err(Error::AuthError)` - Caller is not an authority or admin
    /// - `Err(Error::RequestError)` - City missing
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn get_dashboard_analytics(
        &self,
        caller: &Caller,
        request: DashboardRequest,
        now: DateTime<Utc>,
    ) -> Result<DashboardAnalyticsDto, Error> {
        authorize(caller, Permission::ViewDashboard)?;
        let city = required(request.city, "City is required")?;
        let range = TimeRange::parse(request.time_range.as_deref());

        let end = now.naive_utc();
        let start = end - range.duration();

        let issues = IssueRepository::new(self.db)
            .find_created_between(&city, start, end)
            .await?;
        let metrics = IssueMetrics::from_issues(&issues);

        let user_repo = CivicUserRepository::new(self.db);
        let total_users = user_repo.count_active_in_city(&city).await?;
        let active_users = user_repo.count_active_since(&city, start).await?;

        tracing::debug!(city = %city, issues = metrics.total, ?range, "Computed dashboard analytics");

        Ok(DashboardAnalyticsDto {
            summary: DashboardSummaryDto {
                total_issues: metrics.total,
                resolved_issues: metrics.resolved,
                pending_issues: metrics.pending,
                resolution_rate: metrics.resolution_rate(),
                average_resolution_time: metrics.average_resolution_hours,
                total_users,
                active_users,
                average_rating: metrics.average_rating,
            },
            breakdowns: BreakdownsDto {
                category: metrics.by_category,
                priority: metrics.by_priority,
            },
            time_range: TimeWindowDto {
                start: to_rfc3339(start),
                end: to_rfc3339(end),
            },
        })
    }

    /// Per-department totals and resolution latency over all of a city's issues.
    ///
    /// When `departmentId` is given only that department's issues are grouped.
    pub async fn get_performance_metrics(
        &self,
        caller: &Caller,
        request: PerformanceRequest,
        now: DateTime<Utc>,
    ) -> Result<PerformanceMetricsDto, Error> {
        authorize(caller, Permission::ViewPerformance)?;
        let city = required(request.city, "City is required")?;
        let department = request.department_id.filter(|d| !d.trim().is_empty());

        let issues = IssueRepository::new(self.db)
            .find_by_city(&city, department.as_deref())
            .await?;

        let department_metrics = department_metrics(&issues)
            .into_iter()
            .map(|(department, metrics)| {
                (
                    department,
                    DepartmentMetricsDto {
                        total_issues: metrics.total,
                        resolved_issues: metrics.resolved,
                        average_resolution_time: metrics.average_resolution_hours,
                    },
                )
            })
            .collect();

        Ok(PerformanceMetricsDto {
            city,
            department_metrics,
            generated_at: now.to_rfc3339(),
        })
    }

    /// Writes the snapshot for every active city covering the UTC day before `now`.
    ///
    /// A city that fails is logged and skipped so the remaining cities still get their
    /// snapshot.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of cities whose snapshot was written
    /// - `Err(Error)` - The city list could not be loaded
    pub async fn generate_daily_analytics(&self, now: DateTime<Utc>) -> Result<usize, Error> {
        let day = previous_utc_day(now)?;
        let cities = CivicUserRepository::new(self.db).active_cities().await?;

        let mut processed = 0;
        for city in &cities {
            match self.generate_city_snapshot(city, day, now).await {
                Ok(_) => processed += 1,
                Err(e) => {
                    tracing::error!(city = %city, %day, error = %e, "Failed to generate daily analytics");
                }
            }
        }

        tracing::info!(%day, processed, cities = cities.len(), "Generated daily analytics");

        Ok(processed)
    }

    /// Aggregates one city's issues created on `day` and upserts the snapshot.
    pub async fn generate_city_snapshot(
        &self,
        city: &str,
        day: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DailyAnalyticsModel, Error> {
        let (start, end) = utc_day_bounds(day)?;

        let issues = IssueRepository::new(self.db)
            .find_created_between(city, start, end)
            .await?;
        let metrics = IssueMetrics::from_issues(&issues);

        let snapshot = DailyAnalyticsModel {
            id: format!("{city}_{}", day.format("%Y-%m-%d")),
            city: city.to_string(),
            date: start,
            total_issues: count_to_i32(metrics.total),
            resolved_issues: count_to_i32(metrics.resolved),
            emergency_issues: count_to_i32(metrics.emergency),
            category_breakdown: json!(metrics.by_category),
            priority_breakdown: json!(metrics.by_priority),
            generated_at: now.naive_utc(),
        };

        Ok(DailyAnalyticsRepository::new(self.db).upsert(snapshot).await?)
    }

    /// Exports a city's snapshots between two dates, inclusive.
    ///
    /// # Returns
    /// - `Ok(ExportDto)` - CSV text when `format` is `csv`, otherwise the JSON records
    /// - `Err(Error::AuthError)` - Caller is not an admin
    /// - `Err(Error::RequestError)` - A field is missing or a date is malformed
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn export_analytics_data(
        &self,
        caller: &Caller,
        request: ExportRequest,
    ) -> Result<ExportDto, Error> {
        authorize(caller, Permission::ExportAnalytics)?;

        let missing = "City, start date, and end date are required";
        let city = required(request.city, missing)?;
        let start = parse_request_date("startDate", &required(request.start_date, missing)?)?;
        let end = parse_request_date("endDate", &required(request.end_date, missing)?)?;
        if end < start {
            return Err(RequestError::invalid("endDate must not be before startDate").into());
        }
        let format = ExportFormat::parse(request.format.as_deref());

        let snapshots: Vec<DailyAnalyticsDto> = DailyAnalyticsRepository::new(self.db)
            .find_in_range(&city, start, end)
            .await?
            .into_iter()
            .map(DailyAnalyticsDto::from)
            .collect();

        let data = match format {
            ExportFormat::Json => ExportData::Json(snapshots),
            ExportFormat::Csv => {
                let records = snapshots
                    .iter()
                    .map(|snapshot| match serde_json::to_value(snapshot) {
                        Ok(Value::Object(record)) => Ok(record),
                        Ok(_) => Ok(Map::new()),
                        Err(e) => Err(Error::InternalError(format!(
                            "Failed to serialize snapshot {}: {e}",
                            snapshot.id
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                ExportData::Csv(records_to_csv(&records))
            }
        };

        Ok(ExportDto { data, format })
    }
}

impl From<DailyAnalyticsModel> for DailyAnalyticsDto {
    fn from(model: DailyAnalyticsModel) -> Self {
        Self {
            id: model.id,
            city: model.city,
            date: model.date.format("%Y-%m-%d").to_string(),
            total_issues: model.total_issues,
            resolved_issues: model.resolved_issues,
            emergency_issues: model.emergency_issues,
            category_breakdown: model.category_breakdown,
            priority_breakdown: model.priority_breakdown,
            generated_at: to_rfc3339(model.generated_at),
        }
    }
}

fn count_to_i32(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests;
