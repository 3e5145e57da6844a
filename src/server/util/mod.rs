//! Utility functions and helpers for server operations.
//!
//! Great-circle distance for alert radius filtering, UTC day and date parsing helpers,
//! bearer token verification, CSV rendering for analytics export, and required-field validation.

pub mod csv;
pub mod geo;
pub mod time;
pub mod token;
pub mod validate;
