//! Scheduler for the periodic analytics and cleanup jobs.
//!
//! A cron-based scheduler that runs the daily per-city analytics snapshot and the
//! cleanup of expired alerts and stale notification logs. Job failures are logged and
//! never stop the scheduler.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::error::Error;

pub mod config;
pub mod jobs;

use self::jobs::{run_cleanup, run_daily_analytics};

/// Job scheduler for the background maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, sched })
    }

    /// Registers the daily analytics and cleanup jobs and starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(())` - All jobs registered and scheduler started
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            config::daily_analytics::CRON_EXPRESSION,
            "daily analytics",
            run_daily_analytics,
        )
        .await?;

        self.schedule_job(config::cleanup::CRON_EXPRESSION, "cleanup", run_cleanup)
            .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the database connection and logs the count it returns on
    /// success or the error on failure.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds, e.g. `"0 0 2 * * *"` for 02:00 daily
    /// - `name` - Job name used in log messages
    /// - `function` - Async job body returning the number of records it processed
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<u64, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(count) => tracing::info!(job = %name, count, "Scheduled job finished"),
                        Err(e) => tracing::error!(job = %name, "Scheduled job failed: {}", e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
