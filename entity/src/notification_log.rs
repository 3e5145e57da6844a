use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per notification dispatch, purged after the retention window.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `bulk` or `emergency`.
    pub kind: String,
    pub title: String,
    pub audience: String,
    #[sea_orm(nullable)]
    pub city: Option<String>,
    pub targeted: i32,
    pub sent_count: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
