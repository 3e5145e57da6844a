use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    provider::{AuthProvider, PushProvider},
    util::token::TokenVerifier,
};

/// Dependencies handed to every handler.
///
/// The database connection and both provider clients are constructed once at startup and
/// injected here, so tests can substitute in-memory databases and recording providers.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub push: Arc<dyn PushProvider>,
    pub auth: Arc<dyn AuthProvider>,
    pub token_verifier: Arc<TokenVerifier>,
    /// Shared secret the auth provider presents on account events
    pub event_secret: Arc<str>,
}
