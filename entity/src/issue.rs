use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A reported civic problem.
///
/// Status and priority are stored as plain strings; transitions are driven by callers
/// outside of this service, so values this service does not know about are tolerated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub city: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub reporter_id: String,
    pub reporter_name: String,
    pub reporter_email: String,
    #[sea_orm(nullable)]
    pub assigned_department: Option<String>,
    /// Citizen feedback rating, present once the reporter rated the resolution.
    #[sea_orm(nullable)]
    pub feedback_rating: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback_comment: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
