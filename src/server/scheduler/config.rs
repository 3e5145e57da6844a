//! Cron expressions for the scheduled jobs, evaluated in UTC.

pub mod daily_analytics {
    /// Snapshot the previous UTC day for every active city at 02:00
    pub const CRON_EXPRESSION: &str = "0 0 2 * * *";
}

pub mod cleanup {
    /// Deactivate expired alerts and purge old notification logs at midnight
    pub const CRON_EXPRESSION: &str = "0 0 0 * * *";
}
