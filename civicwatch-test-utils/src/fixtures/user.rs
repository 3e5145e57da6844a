use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn user(&mut self) -> UserFixtures<'_> {
        UserFixtures { test: self }
    }
}

pub struct UserFixtures<'a> {
    test: &'a mut TestContext,
}

impl UserFixtures<'_> {
    /// Insert a profile record exactly as given.
    pub async fn insert(
        &self,
        user: entity::civic_user::Model,
    ) -> Result<entity::civic_user::Model, TestError> {
        let am = entity::civic_user::ActiveModel {
            uid: ActiveValue::Set(user.uid),
            email: ActiveValue::Set(user.email),
            display_name: ActiveValue::Set(user.display_name),
            photo_url: ActiveValue::Set(user.photo_url),
            role: ActiveValue::Set(user.role),
            is_active: ActiveValue::Set(user.is_active),
            city: ActiveValue::Set(user.city),
            language: ActiveValue::Set(user.language),
            theme: ActiveValue::Set(user.theme),
            push_enabled: ActiveValue::Set(user.push_enabled),
            email_enabled: ActiveValue::Set(user.email_enabled),
            whatsapp_enabled: ActiveValue::Set(user.whatsapp_enabled),
            alerts_enabled: ActiveValue::Set(user.alerts_enabled),
            fcm_token: ActiveValue::Set(user.fcm_token),
            token_updated_at: ActiveValue::Set(user.token_updated_at),
            last_known_latitude: ActiveValue::Set(user.last_known_latitude),
            last_known_longitude: ActiveValue::Set(user.last_known_longitude),
            last_active_at: ActiveValue::Set(user.last_active_at),
            total_reports: ActiveValue::Set(user.total_reports),
            resolved_reports: ActiveValue::Set(user.resolved_reports),
            feedback_given: ActiveValue::Set(user.feedback_given),
            created_at: ActiveValue::Set(user.created_at),
            updated_at: ActiveValue::Set(user.updated_at),
        };

        Ok(entity::prelude::CivicUser::insert(am)
            .exec_with_returning(&self.test.db)
            .await?)
    }

    /// Fetch a profile record by uid.
    pub async fn get(&self, uid: &str) -> Result<Option<entity::civic_user::Model>, TestError> {
        Ok(entity::prelude::CivicUser::find_by_id(uid.to_string())
            .one(&self.test.db)
            .await?)
    }
}
