use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Precomputed issue aggregate for one city and one UTC day.
///
/// The primary key is `{city}_{YYYY-MM-DD}` so regenerating a day overwrites the
/// previous snapshot.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub city: String,
    /// Start of the UTC day the snapshot covers.
    pub date: DateTime,
    pub total_issues: i32,
    pub resolved_issues: i32,
    pub emergency_issues: i32,
    pub category_breakdown: Json,
    pub priority_breakdown: Json,
    pub generated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
