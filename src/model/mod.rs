//! Request and response bodies of the JSON API.

pub mod analytics;
pub mod api;
pub mod notification;
pub mod user;
