//! SeaORM entities for the civicwatch schema.
//!
//! Tables are created by the `migration` crate; these definitions mirror them column for
//! column so repositories can query with typed columns.

pub mod prelude;

pub mod alert;
pub mod civic_user;
pub mod daily_analytics;
pub mod issue;
pub mod notification_log;
