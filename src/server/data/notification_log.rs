use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::model::{db::NotificationLogModel, notification::NotificationKind};

/// Values recorded for one dispatch.
#[derive(Debug, Clone)]
pub struct NewNotificationLog<'a> {
    pub kind: NotificationKind,
    pub title: &'a str,
    pub audience: &'a str,
    pub city: Option<&'a str>,
    pub targeted: usize,
    pub sent_count: usize,
    pub created_at: NaiveDateTime,
}

pub struct NotificationLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, log: NewNotificationLog<'_>) -> Result<NotificationLogModel, DbErr> {
        let log = entity::notification_log::ActiveModel {
            kind: ActiveValue::Set(log.kind.as_str().to_string()),
            title: ActiveValue::Set(log.title.to_string()),
            audience: ActiveValue::Set(log.audience.to_string()),
            city: ActiveValue::Set(log.city.map(str::to_string)),
            targeted: ActiveValue::Set(i32::try_from(log.targeted).unwrap_or(i32::MAX)),
            sent_count: ActiveValue::Set(i32::try_from(log.sent_count).unwrap_or(i32::MAX)),
            created_at: ActiveValue::Set(log.created_at),
            ..Default::default()
        };

        log.insert(self.db).await
    }

    /// Deletes up to `limit` logs created before `cutoff`, oldest ids first
    ///
    /// Returns the number of rows deleted; a result below `limit` means no older logs remain.
    pub async fn delete_page_older_than(&self, cutoff: NaiveDateTime, limit: u64) -> Result<u64, DbErr> {
        let ids: Vec<i32> = entity::prelude::NotificationLog::find()
            .select_only()
            .column(entity::notification_log::Column::Id)
            .filter(entity::notification_log::Column::CreatedAt.lt(cutoff))
            .order_by_asc(entity::notification_log::Column::Id)
            .limit(limit)
            .into_tuple()
            .all(self.db)
            .await?;

        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::NotificationLog::delete_many()
            .filter(entity::notification_log::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
