//! Server application models and type definitions.
//!
//! Application state, typed roles and permissions, database model aliases, and the small
//! enums that give names to the string fields stored on issues, users and notifications.

pub mod analytics;
pub mod app;
pub mod auth;
pub mod db;
pub mod issue;
pub mod notification;
