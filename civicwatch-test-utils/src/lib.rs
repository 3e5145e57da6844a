//! Test harness for civicwatch.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares the tables, seeded records
//! and mock HTTP endpoints a test needs, then `build()` returns a [`TestContext`] holding
//! an in-memory SQLite database and the mock server. Fixture helpers on the context insert
//! further records during the test body.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_CITY, TEST_EVENT_SECRET, TEST_TOKEN_SECRET},
        fixtures::{auth::sign_token, factory},
        TestBuilder, TestContext, TestError,
    };
}
