//! Backend for a civic issue-reporting application.
//!
//! Citizens report problems, authorities track and resolve them, and this crate provides
//! the server side around that data: analytics over reported issues, push notification
//! dispatch, scheduled cleanup, and reactions to account lifecycle events from the external
//! auth provider.

pub mod model;
pub mod server;
