use sea_orm::{ActiveValue, EntityTrait, PaginatorTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn notification_log(&mut self) -> NotificationLogFixtures<'_> {
        NotificationLogFixtures { test: self }
    }
}

pub struct NotificationLogFixtures<'a> {
    test: &'a mut TestContext,
}

impl NotificationLogFixtures<'_> {
    /// Insert `count` copies of `log`.
    pub async fn insert_many(
        &self,
        log: entity::notification_log::Model,
        count: usize,
    ) -> Result<(), TestError> {
        let rows = (0..count).map(|_| entity::notification_log::ActiveModel {
            id: ActiveValue::NotSet,
            kind: ActiveValue::Set(log.kind.clone()),
            title: ActiveValue::Set(log.title.clone()),
            audience: ActiveValue::Set(log.audience.clone()),
            city: ActiveValue::Set(log.city.clone()),
            targeted: ActiveValue::Set(log.targeted),
            sent_count: ActiveValue::Set(log.sent_count),
            created_at: ActiveValue::Set(log.created_at),
        });

        if count > 0 {
            entity::prelude::NotificationLog::insert_many(rows)
                .exec(&self.test.db)
                .await?;
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, TestError> {
        Ok(entity::prelude::NotificationLog::find()
            .count(&self.test.db)
            .await?)
    }

    pub async fn all(&self) -> Result<Vec<entity::notification_log::Model>, TestError> {
        Ok(entity::prelude::NotificationLog::find()
            .all(&self.test.db)
            .await?)
    }
}
