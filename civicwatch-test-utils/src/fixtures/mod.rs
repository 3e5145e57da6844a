//! Fixtures for seeding records and authenticating requests during a test.
//!
//! - `auth` - signed bearer tokens
//! - `factory` - in-memory models with standard test values
//! - `user`, `issue`, `alert`, `notification_log` - inserts through the [`TestContext`](crate::TestContext)

pub mod alert;
pub mod auth;
pub mod factory;
pub mod issue;
pub mod notification_log;
pub mod user;
