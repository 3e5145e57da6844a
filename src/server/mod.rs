//! Server application core modules.
//!
//! This module contains all server-side functionality: HTTP routing for the callable
//! operations, account event triggers, database repositories, analytics aggregation, push
//! notification dispatch, scheduled jobs, and the clients for the external auth and push
//! providers.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod provider;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
