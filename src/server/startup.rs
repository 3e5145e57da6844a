use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::Error,
    model::app::AppState,
    provider::{FcmPushProvider, HttpAuthProvider},
    util::token::TokenVerifier,
};

const DEFAULT_LOG_FILTER: &str = "civicwatch=info,tower_http=info";

/// Install the global tracing subscriber, filtered by `RUST_LOG`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the push and auth provider clients and assemble the shared handler state
pub fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("civicwatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(crate::server::error::provider::ProviderError::from)?;

    let push = FcmPushProvider::new(
        client.clone(),
        &config.fcm_api_url,
        &config.fcm_project_id,
        config.fcm_access_token.clone(),
    );
    let auth = HttpAuthProvider::new(
        client,
        &config.auth_admin_url,
        config.auth_admin_key.clone(),
    );

    Ok(AppState {
        db,
        push: Arc::new(push),
        auth: Arc::new(auth),
        token_verifier: Arc::new(TokenVerifier::new(&config.auth_token_secret)),
        event_secret: Arc::from(config.auth_event_secret.as_str()),
    })
}
