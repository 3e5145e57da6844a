//! Builds [`AppState`] from a [`TestContext`] with in-memory providers.

use std::sync::Arc;

use civicwatch::server::{
    model::app::AppState,
    provider::{
        recording::{RecordingAuthProvider, RecordingPushProvider},
        AuthProvider, PushProvider,
    },
    util::token::TokenVerifier,
};
use civicwatch_test_utils::prelude::*;

/// Extension trait for TestContext to create AppState without real provider clients
pub trait TestContextExt {
    /// State with recording providers that accept every call
    fn into_app_state(&self) -> AppState;

    /// State with the given providers, for tests that inspect or fail provider calls
    fn into_app_state_with(
        &self,
        push: Arc<dyn PushProvider>,
        auth: Arc<dyn AuthProvider>,
    ) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with(
            Arc::new(RecordingPushProvider::new()),
            Arc::new(RecordingAuthProvider::new()),
        )
    }

    fn into_app_state_with(
        &self,
        push: Arc<dyn PushProvider>,
        auth: Arc<dyn AuthProvider>,
    ) -> AppState {
        AppState {
            db: self.db.clone(),
            push,
            auth,
            token_verifier: Arc::new(TokenVerifier::new(TEST_TOKEN_SECRET)),
            event_secret: Arc::from(TEST_EVENT_SECRET),
        }
    }
}
