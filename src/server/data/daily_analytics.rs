use chrono::NaiveDateTime;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::server::model::db::DailyAnalyticsModel;

pub struct DailyAnalyticsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DailyAnalyticsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a snapshot or overwrites the existing one for the same city and day
    pub async fn upsert(&self, snapshot: DailyAnalyticsModel) -> Result<DailyAnalyticsModel, DbErr> {
        let snapshot = entity::daily_analytics::ActiveModel {
            id: ActiveValue::Set(snapshot.id),
            city: ActiveValue::Set(snapshot.city),
            date: ActiveValue::Set(snapshot.date),
            total_issues: ActiveValue::Set(snapshot.total_issues),
            resolved_issues: ActiveValue::Set(snapshot.resolved_issues),
            emergency_issues: ActiveValue::Set(snapshot.emergency_issues),
            category_breakdown: ActiveValue::Set(snapshot.category_breakdown),
            priority_breakdown: ActiveValue::Set(snapshot.priority_breakdown),
            generated_at: ActiveValue::Set(snapshot.generated_at),
        };

        entity::prelude::DailyAnalytics::insert(snapshot)
            .on_conflict(
                OnConflict::column(entity::daily_analytics::Column::Id)
                    .update_columns([
                        entity::daily_analytics::Column::TotalIssues,
                        entity::daily_analytics::Column::ResolvedIssues,
                        entity::daily_analytics::Column::EmergencyIssues,
                        entity::daily_analytics::Column::CategoryBreakdown,
                        entity::daily_analytics::Column::PriorityBreakdown,
                        entity::daily_analytics::Column::GeneratedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Snapshots of `city` whose day lies in `[start, end]`, oldest first
    pub async fn find_in_range(
        &self,
        city: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<DailyAnalyticsModel>, DbErr> {
        entity::prelude::DailyAnalytics::find()
            .filter(entity::daily_analytics::Column::City.eq(city))
            .filter(entity::daily_analytics::Column::Date.gte(start))
            .filter(entity::daily_analytics::Column::Date.lte(end))
            .order_by_asc(entity::daily_analytics::Column::Date)
            .all(self.db)
            .await
    }
}
