//! Scheduled cleanup sweeps.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{alert::AlertRepository, notification_log::NotificationLogRepository},
    error::Error,
};

/// Notification logs older than this are purged.
pub fn log_retention() -> Duration {
    Duration::days(30)
}

/// Rows deleted per purge statement.
pub const PURGE_PAGE_SIZE: u64 = 500;

/// Counts from one cleanup run; `None` marks a sweep that failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub alerts_deactivated: Option<u64>,
    pub logs_purged: Option<u64>,
}

pub struct JanitorService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> JanitorService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks every active alert whose expiry has passed as inactive.
    pub async fn deactivate_expired_alerts(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let count = AlertRepository::new(self.db)
            .deactivate_expired(now.naive_utc())
            .await?;

        Ok(count)
    }

    /// Deletes notification logs older than the retention window, page by page until none remain.
    ///
    /// # Returns
    /// - `Ok(u64)` - Total rows deleted across all pages
    /// - `Err(Error::DbErr)` - A page failed; earlier pages stay deleted
    pub async fn purge_notification_logs(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let cutoff = now.naive_utc() - log_retention();
        let repo = NotificationLogRepository::new(self.db);

        let mut total = 0;
        loop {
            let deleted = repo.delete_page_older_than(cutoff, PURGE_PAGE_SIZE).await?;
            total += deleted;
            if deleted < PURGE_PAGE_SIZE {
                break;
            }
        }

        Ok(total)
    }

    /// Runs both sweeps; a failing sweep is logged and does not stop the other.
    pub async fn run_cleanup(&self, now: DateTime<Utc>) -> CleanupReport {
        let mut report = CleanupReport::default();

        match self.deactivate_expired_alerts(now).await {
            Ok(count) => {
                tracing::info!(count, "Deactivated expired alerts");
                report.alerts_deactivated = Some(count);
            }
            Err(e) => tracing::error!(error = %e, "Failed to deactivate expired alerts"),
        }

        match self.purge_notification_logs(now).await {
            Ok(count) => {
                tracing::info!(count, "Purged old notification logs");
                report.logs_purged = Some(count);
            }
            Err(e) => tracing::error!(error = %e, "Failed to purge notification logs"),
        }

        report
    }
}
