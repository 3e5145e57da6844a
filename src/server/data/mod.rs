//! Data access layer repositories.
//!
//! Each repository wraps one table and is generic over [`sea_orm::ConnectionTrait`], so the
//! same queries run on a pooled connection or inside a transaction.

pub mod alert;
pub mod civic_user;
pub mod daily_analytics;
pub mod issue;
pub mod notification_log;
