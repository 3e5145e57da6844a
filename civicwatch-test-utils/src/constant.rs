//! Shared values for test configuration. None of these are real credentials.

/// HS256 secret bearer tokens are signed with in tests.
pub static TEST_TOKEN_SECRET: &str = "test_token_secret";

/// Shared secret presented on account event requests in tests.
pub static TEST_EVENT_SECRET: &str = "test_event_secret";

/// City most fixtures are placed in.
pub static TEST_CITY: &str = "Springfield";

/// Push provider project used when pointing the FCM client at the mock server.
pub static TEST_FCM_PROJECT_ID: &str = "civicwatch-test";

/// Access token presented to mocked provider APIs.
pub static TEST_PROVIDER_KEY: &str = "test_provider_key";
