//! Helpers for driving the HTTP router in integration tests.

mod request;
mod test_utils;

pub use request::{call, get, post_json};
pub use test_utils::TestContextExt;
