//! Extractors shared across controllers.
//!
//! [`CallableJson`] reports malformed bodies with the API's own error shape, and
//! [`EventSource`] guards the account event endpoints with the shared event secret.

pub mod event_source;
pub mod json;

pub use event_source::EventSource;
pub use json::CallableJson;
