use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile record for an account owned by the external auth provider.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "civic_user")]
pub struct Model {
    /// Account identity issued by the auth provider.
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    #[sea_orm(nullable)]
    pub email: Option<String>,
    pub display_name: String,
    pub photo_url: String,
    /// One of `citizen`, `authority`, `admin`.
    pub role: String,
    pub is_active: bool,
    #[sea_orm(nullable)]
    pub city: Option<String>,
    pub language: String,
    pub theme: String,
    pub push_enabled: bool,
    pub email_enabled: bool,
    pub whatsapp_enabled: bool,
    /// Opt-in for emergency alert broadcasts.
    pub alerts_enabled: bool,
    /// Push device token, cleared when the push provider reports it unregistered.
    #[sea_orm(nullable)]
    pub fcm_token: Option<String>,
    #[sea_orm(nullable)]
    pub token_updated_at: Option<DateTime>,
    #[sea_orm(nullable)]
    pub last_known_latitude: Option<f64>,
    #[sea_orm(nullable)]
    pub last_known_longitude: Option<f64>,
    #[sea_orm(nullable)]
    pub last_active_at: Option<DateTime>,
    pub total_reports: i32,
    pub resolved_reports: i32,
    pub feedback_given: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
