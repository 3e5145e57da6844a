//! Database model type aliases.
//!
//! Shorter names for the SeaORM models in the `entity` crate, used throughout repositories
//! and services.

/// Profile record of an account.
pub type UserModel = entity::civic_user::Model;

/// Reported civic issue.
pub type IssueModel = entity::issue::Model;

/// Precomputed city-day analytics snapshot.
pub type DailyAnalyticsModel = entity::daily_analytics::Model;

/// Emergency alert record.
pub type AlertModel = entity::alert::Model;

/// Record of one notification dispatch.
pub type NotificationLogModel = entity::notification_log::Model;
