use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error,
    service::{analytics::AnalyticsService, janitor::JanitorService},
};

/// Writes yesterday's snapshot for every active city, returning the number of snapshots.
pub async fn run_daily_analytics(db: DatabaseConnection) -> Result<u64, Error> {
    let written = AnalyticsService::new(&db)
        .generate_daily_analytics(Utc::now())
        .await?;

    Ok(written as u64)
}

/// Runs both cleanup steps, returning the number of rows they touched.
///
/// Each step logs its own failure, so this job never reports an error.
pub async fn run_cleanup(db: DatabaseConnection) -> Result<u64, Error> {
    let report = JanitorService::new(&db).run_cleanup(Utc::now()).await;

    Ok(report.alerts_deactivated.unwrap_or(0) + report.logs_purged.unwrap_or(0))
}
