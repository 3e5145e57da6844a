use chrono::NaiveDateTime;
use migration::Expr;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::model::db::AlertModel;

/// Values for a new emergency alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub title: String,
    pub message: String,
    pub priority: String,
    pub city: String,
    pub location: Option<(f64, f64)>,
    pub radius_km: f64,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

pub struct AlertRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AlertRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Persists an active emergency alert
    pub async fn create(&self, alert: NewAlert) -> Result<AlertModel, DbErr> {
        let (latitude, longitude) = match alert.location {
            Some((latitude, longitude)) => (Some(latitude), Some(longitude)),
            None => (None, None),
        };

        let alert = entity::alert::ActiveModel {
            title: ActiveValue::Set(alert.title),
            message: ActiveValue::Set(alert.message),
            alert_type: ActiveValue::Set("emergency".to_string()),
            priority: ActiveValue::Set(alert.priority),
            city: ActiveValue::Set(alert.city),
            latitude: ActiveValue::Set(latitude),
            longitude: ActiveValue::Set(longitude),
            radius_km: ActiveValue::Set(alert.radius_km),
            is_active: ActiveValue::Set(true),
            created_by: ActiveValue::Set(alert.created_by),
            created_at: ActiveValue::Set(alert.created_at),
            expires_at: ActiveValue::Set(alert.expires_at),
            ..Default::default()
        };

        alert.insert(self.db).await
    }

    /// Marks active alerts that expired before `now` as inactive in one statement
    ///
    /// Alerts are never deleted so they stay available for audit.
    pub async fn deactivate_expired(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::Alert::update_many()
            .col_expr(entity::alert::Column::IsActive, Expr::value(false))
            .filter(entity::alert::Column::IsActive.eq(true))
            .filter(entity::alert::Column::ExpiresAt.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
