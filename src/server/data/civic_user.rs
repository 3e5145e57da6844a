use chrono::{NaiveDateTime, Utc};
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::user::{AuthAccountDto, PreferencesDto},
    server::model::{auth::Role, db::UserModel},
};

/// Selects users eligible for a push dispatch.
///
/// Only active profiles holding a device token are ever returned.
#[derive(Debug, Clone, Default)]
pub struct RecipientFilter<'a> {
    pub role: Option<Role>,
    pub city: Option<&'a str>,
    /// Require `push_enabled`
    pub push_enabled: bool,
    /// Require `alerts_enabled`
    pub alerts_enabled: bool,
}

pub struct CivicUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CivicUserRepository<'a, C> {
    /// Creates a new instance of [`CivicUserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the default profile for a newly registered account
    pub async fn create(&self, account: AuthAccountDto) -> Result<UserModel, DbErr> {
        let now = Utc::now().naive_utc();
        let defaults = PreferencesDto::default();

        let user = entity::civic_user::ActiveModel {
            uid: ActiveValue::Set(account.uid),
            email: ActiveValue::Set(account.email),
            display_name: ActiveValue::Set(account.display_name.unwrap_or_default()),
            photo_url: ActiveValue::Set(account.photo_url.unwrap_or_default()),
            role: ActiveValue::Set(Role::default().as_str().to_string()),
            is_active: ActiveValue::Set(true),
            city: ActiveValue::Set(None),
            language: ActiveValue::Set(defaults.language),
            theme: ActiveValue::Set(defaults.theme),
            push_enabled: ActiveValue::Set(defaults.notifications.push_enabled),
            email_enabled: ActiveValue::Set(defaults.notifications.email_enabled),
            whatsapp_enabled: ActiveValue::Set(defaults.notifications.whatsapp_enabled),
            alerts_enabled: ActiveValue::Set(defaults.notifications.alerts),
            fcm_token: ActiveValue::Set(None),
            token_updated_at: ActiveValue::Set(None),
            last_known_latitude: ActiveValue::Set(None),
            last_known_longitude: ActiveValue::Set(None),
            last_active_at: ActiveValue::Set(None),
            total_reports: ActiveValue::Set(0),
            resolved_reports: ActiveValue::Set(0),
            feedback_given: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, uid: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::CivicUser::find_by_id(uid.to_string())
            .one(self.db)
            .await
    }

    /// Deletes a profile
    ///
    /// Returns OK regardless of the profile existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, uid: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::CivicUser::delete_by_id(uid.to_string())
            .exec(self.db)
            .await
    }

    /// Sets the profile role, returning the number of rows updated
    pub async fn update_role(&self, uid: &str, role: Role) -> Result<u64, DbErr> {
        let result = entity::prelude::CivicUser::update_many()
            .col_expr(entity::civic_user::Column::Role, Expr::value(role.as_str()))
            .col_expr(
                entity::civic_user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::civic_user::Column::Uid.eq(uid))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn update_stats(
        &self,
        uid: &str,
        total_reports: i32,
        resolved_reports: i32,
        feedback_given: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::CivicUser::update_many()
            .col_expr(entity::civic_user::Column::TotalReports, Expr::value(total_reports))
            .col_expr(
                entity::civic_user::Column::ResolvedReports,
                Expr::value(resolved_reports),
            )
            .col_expr(entity::civic_user::Column::FeedbackGiven, Expr::value(feedback_given))
            .col_expr(
                entity::civic_user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::civic_user::Column::Uid.eq(uid))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Replaces the whole preference set of a profile
    pub async fn update_preferences(&self, uid: &str, preferences: &PreferencesDto) -> Result<u64, DbErr> {
        let result = entity::prelude::CivicUser::update_many()
            .col_expr(
                entity::civic_user::Column::Language,
                Expr::value(preferences.language.clone()),
            )
            .col_expr(
                entity::civic_user::Column::Theme,
                Expr::value(preferences.theme.clone()),
            )
            .col_expr(
                entity::civic_user::Column::PushEnabled,
                Expr::value(preferences.notifications.push_enabled),
            )
            .col_expr(
                entity::civic_user::Column::EmailEnabled,
                Expr::value(preferences.notifications.email_enabled),
            )
            .col_expr(
                entity::civic_user::Column::WhatsappEnabled,
                Expr::value(preferences.notifications.whatsapp_enabled),
            )
            .col_expr(
                entity::civic_user::Column::AlertsEnabled,
                Expr::value(preferences.notifications.alerts),
            )
            .col_expr(
                entity::civic_user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::civic_user::Column::Uid.eq(uid))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn set_fcm_token(&self, uid: &str, token: &str, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::CivicUser::update_many()
            .col_expr(entity::civic_user::Column::FcmToken, Expr::value(token))
            .col_expr(entity::civic_user::Column::TokenUpdatedAt, Expr::value(now))
            .col_expr(entity::civic_user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::civic_user::Column::Uid.eq(uid))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Removes device tokens from whichever profiles hold them
    pub async fn clear_fcm_tokens(&self, tokens: &[&String]) -> Result<u64, DbErr> {
        if tokens.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::CivicUser::update_many()
            .col_expr(
                entity::civic_user::Column::FcmToken,
                Expr::value(Option::<String>::None),
            )
            .filter(entity::civic_user::Column::FcmToken.is_in(tokens.iter().map(|t| t.as_str())))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Active profiles with a device token matching `filter`, ordered by uid
    pub async fn find_recipients(&self, filter: &RecipientFilter<'_>) -> Result<Vec<UserModel>, DbErr> {
        let mut query = entity::prelude::CivicUser::find()
            .filter(entity::civic_user::Column::IsActive.eq(true))
            .filter(entity::civic_user::Column::FcmToken.is_not_null())
            .filter(entity::civic_user::Column::FcmToken.ne(""));

        if let Some(role) = filter.role {
            query = query.filter(entity::civic_user::Column::Role.eq(role.as_str()));
        }
        if let Some(city) = filter.city {
            query = query.filter(entity::civic_user::Column::City.eq(city));
        }
        if filter.push_enabled {
            query = query.filter(entity::civic_user::Column::PushEnabled.eq(true));
        }
        if filter.alerts_enabled {
            query = query.filter(entity::civic_user::Column::AlertsEnabled.eq(true));
        }

        query
            .order_by_asc(entity::civic_user::Column::Uid)
            .all(self.db)
            .await
    }

    /// Counts active profiles in a city
    pub async fn count_active_in_city(&self, city: &str) -> Result<u64, DbErr> {
        entity::prelude::CivicUser::find()
            .filter(entity::civic_user::Column::IsActive.eq(true))
            .filter(entity::civic_user::Column::City.eq(city))
            .count(self.db)
            .await
    }

    /// Counts active profiles in a city seen at or after `since`
    pub async fn count_active_since(&self, city: &str, since: NaiveDateTime) -> Result<u64, DbErr> {
        entity::prelude::CivicUser::find()
            .filter(entity::civic_user::Column::IsActive.eq(true))
            .filter(entity::civic_user::Column::City.eq(city))
            .filter(entity::civic_user::Column::LastActiveAt.gte(since))
            .count(self.db)
            .await
    }

    /// Distinct non-empty cities of active profiles, sorted
    pub async fn active_cities(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::CivicUser::find()
            .select_only()
            .column(entity::civic_user::Column::City)
            .distinct()
            .filter(entity::civic_user::Column::IsActive.eq(true))
            .filter(entity::civic_user::Column::City.is_not_null())
            .filter(entity::civic_user::Column::City.ne(""))
            .order_by_asc(entity::civic_user::Column::City)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }
}
