//! HTTP controller endpoints for the civicwatch API.
//!
//! Axum handlers for the callable operations (analytics, notifications, user profile),
//! the account event triggers, and the health check. Handlers extract the caller and the
//! request body, delegate to a service, and return the JSON result; errors render through
//! [`Error`](crate::server::error::Error). Each handler carries a utoipa path for the
//! OpenAPI document.

pub mod analytics;
pub mod event;
pub mod health;
pub mod notification;
pub mod user;
pub mod util;
