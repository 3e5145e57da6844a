//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and the external providers: analytics aggregation and
//! daily snapshots, push notification dispatch, scheduled cleanup of expired data, and the
//! account lifecycle and profile operations.

pub mod analytics;
pub mod janitor;
pub mod notification;
pub mod user;
