pub use super::alert::Entity as Alert;
pub use super::civic_user::Entity as CivicUser;
pub use super::daily_analytics::Entity as DailyAnalytics;
pub use super::issue::Entity as Issue;
pub use super::notification_log::Entity as NotificationLog;
