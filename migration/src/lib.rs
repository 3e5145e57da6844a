pub use sea_orm_migration::prelude::*;

mod m20260110_000001_civic_user;
mod m20260110_000002_issue;
mod m20260110_000003_daily_analytics;
mod m20260110_000004_alert;
mod m20260110_000005_notification_log;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_civic_user::Migration),
            Box::new(m20260110_000002_issue::Migration),
            Box::new(m20260110_000003_daily_analytics::Migration),
            Box::new(m20260110_000004_alert::Migration),
            Box::new(m20260110_000005_notification_log::Migration),
        ]
    }
}
