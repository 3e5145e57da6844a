use crate::server::error::config::ConfigError;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_FCM_API_URL: &str = "https://fcm.googleapis.com";

/// Server configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// HS256 secret the auth provider signs caller tokens with
    pub auth_token_secret: String,
    /// Shared secret presented on account event deliveries
    pub auth_event_secret: String,
    pub auth_admin_url: String,
    pub auth_admin_key: String,
    pub fcm_project_id: String,
    pub fcm_access_token: String,
    pub fcm_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            listen_addr: optional("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
            auth_token_secret: required("AUTH_TOKEN_SECRET")?,
            auth_event_secret: required("AUTH_EVENT_SECRET")?,
            auth_admin_url: required("AUTH_ADMIN_URL")?,
            auth_admin_key: required("AUTH_ADMIN_KEY")?,
            fcm_project_id: required("FCM_PROJECT_ID")?,
            fcm_access_token: required("FCM_ACCESS_TOKEN")?,
            fcm_api_url: optional("FCM_API_URL", DEFAULT_FCM_API_URL)?,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) | Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingEnvVar(var.to_string())),
        Err(err) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: err.to_string(),
        }),
    }
}

fn optional(var: &str, default: &str) -> Result<String, ConfigError> {
    match required(var) {
        Err(ConfigError::MissingEnvVar(_)) => Ok(default.to_string()),
        other => other,
    }
}
