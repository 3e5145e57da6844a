use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn alert(&mut self) -> AlertFixtures<'_> {
        AlertFixtures { test: self }
    }
}

pub struct AlertFixtures<'a> {
    test: &'a mut TestContext,
}

impl AlertFixtures<'_> {
    /// Insert an alert; the model's `id` is assigned by the database.
    pub async fn insert(&self, alert: entity::alert::Model) -> Result<entity::alert::Model, TestError> {
        let am = entity::alert::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(alert.title),
            message: ActiveValue::Set(alert.message),
            alert_type: ActiveValue::Set(alert.alert_type),
            priority: ActiveValue::Set(alert.priority),
            city: ActiveValue::Set(alert.city),
            latitude: ActiveValue::Set(alert.latitude),
            longitude: ActiveValue::Set(alert.longitude),
            radius_km: ActiveValue::Set(alert.radius_km),
            is_active: ActiveValue::Set(alert.is_active),
            created_by: ActiveValue::Set(alert.created_by),
            created_at: ActiveValue::Set(alert.created_at),
            expires_at: ActiveValue::Set(alert.expires_at),
        };

        Ok(entity::prelude::Alert::insert(am)
            .exec_with_returning(&self.test.db)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::alert::Model>, TestError> {
        Ok(entity::prelude::Alert::find_by_id(id).one(&self.test.db).await?)
    }
}
