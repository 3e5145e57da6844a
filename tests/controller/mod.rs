//! Tests for HTTP controller endpoints.
//!
//! Each request is routed through the full application router, so these cover bearer
//! token extraction, body parsing, error rendering and the handler together.

mod analytics;
mod event;
mod health;
mod notification;
mod user;

use axum::http::StatusCode;
use civicwatch_test_utils::prelude::*;
use serde_json::json;

use crate::util::{call, get, post_json, TestContextExt};
