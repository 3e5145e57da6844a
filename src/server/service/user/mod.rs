//! User service layer.
//!
//! Reacts to account lifecycle events from the auth provider and serves the profile
//! operations callers invoke for themselves: stats, preferences and device tokens, plus
//! role management for admins.

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::MessageDto,
        user::{AuthAccountDto, UpdatePreferencesRequest, UpdateRoleRequest, UserStatsDto},
    },
    server::{
        data::{civic_user::CivicUserRepository, issue::IssueRepository},
        error::{request::RequestError, Error},
        model::auth::{authorize, Caller, Permission, Role},
        provider::{AuthProvider, CustomClaims},
        util::validate::required,
    },
};

/// Result of removing an account's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub profile_deleted: bool,
    pub issues_anonymized: u64,
}

/// Service for profile lifecycle and self-service profile operations.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    auth: &'a dyn AuthProvider,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection, auth: &'a dyn AuthProvider) -> Self {
        Self { db, auth }
    }

    /// Creates the default profile for a new account and grants it citizen claims.
    ///
    /// # Arguments
    /// - `account` - Account record delivered by the auth provider
    ///
    /// # Returns
    /// - `Ok(())` - Profile stored and claims set
    /// - `Err(Error::DbErr)` - Profile insert failed, e.g. the profile already exists
    /// - `Err(Error::ProviderError)` - The auth provider rejected the claims update
    pub async fn handle_user_created(&self, account: AuthAccountDto) -> Result<(), Error> {
        let user = CivicUserRepository::new(self.db).create(account).await?;

        self.auth
            .set_custom_claims(
                &user.uid,
                &CustomClaims {
                    role: Role::Citizen,
                    is_active: true,
                },
            )
            .await?;

        tracing::info!(uid = %user.uid, "Created user profile");

        Ok(())
    }

    /// Deletes an account's profile and anonymizes the issues it reported.
    ///
    /// Both writes happen in one transaction so a failure leaves neither applied.
    pub async fn handle_user_deleted(&self, uid: &str, now: DateTime<Utc>) -> Result<DeletionOutcome, Error> {
        let txn = self.db.begin().await?;

        let deleted = CivicUserRepository::new(&txn).delete(uid).await?;
        let issues_anonymized = IssueRepository::new(&txn)
            .anonymize_reporter(uid, now.naive_utc())
            .await?;

        txn.commit().await?;

        tracing::info!(uid, issues_anonymized, "Removed user data");

        Ok(DeletionOutcome {
            profile_deleted: deleted.rows_affected > 0,
            issues_anonymized,
        })
    }

    /// Changes another user's role in both the auth provider claims and the profile.
    ///
    /// # Returns
    /// - `Ok(MessageDto)` - Role updated
    /// - `Err(Error::AuthError)` - Caller is not an admin
    /// - `Err(Error::RequestError)` - Field missing, unknown role, or no such profile
    /// - `Err(Error::ProviderError)` - The auth provider rejected the claims update
    pub async fn update_user_role(
        &self,
        caller: &Caller,
        request: UpdateRoleRequest,
    ) -> Result<MessageDto, Error> {
        authorize(caller, Permission::ManageRoles)?;
        let missing = "userId and newRole are required";
        let user_id = required(request.user_id, missing)?;
        let new_role: Role = required(request.new_role, missing)?
            .parse()
            .map_err(|_| RequestError::invalid("Invalid role specified"))?;

        let repo = CivicUserRepository::new(self.db);
        let user = repo
            .get(&user_id)
            .await?
            .ok_or_else(|| RequestError::NotFound("User profile not found".to_string()))?;

        self.auth
            .set_custom_claims(
                &user.uid,
                &CustomClaims {
                    role: new_role,
                    is_active: user.is_active,
                },
            )
            .await?;
        repo.update_role(&user.uid, new_role).await?;

        tracing::info!(uid = %user.uid, role = %new_role, by = %caller.uid, "Updated user role");

        Ok(MessageDto::success("User role updated successfully"))
    }

    /// Recomputes the caller's report counters from their issues and stores them.
    pub async fn get_user_stats(&self, caller: &Caller) -> Result<UserStatsDto, Error> {
        let repo = CivicUserRepository::new(self.db);
        let user = repo
            .get(&caller.uid)
            .await?
            .ok_or_else(|| RequestError::NotFound("User profile not found".to_string()))?;

        let counts = IssueRepository::new(self.db)
            .count_by_reporter(&user.uid)
            .await?;

        repo.update_stats(
            &user.uid,
            clamp_i32(counts.total),
            clamp_i32(counts.resolved),
            clamp_i32(counts.with_feedback),
        )
        .await?;

        let resolution_rate = if counts.total > 0 {
            counts.resolved as f64 / counts.total as f64 * 100.0
        } else {
            0.0
        };

        Ok(UserStatsDto {
            total_reports: counts.total,
            resolved_reports: counts.resolved,
            feedback_given: counts.with_feedback,
            resolution_rate,
            city: user.city.unwrap_or_default(),
            join_date: Some(user.created_at),
        })
    }

    /// Replaces the caller's whole preference set.
    pub async fn update_user_preferences(
        &self,
        caller: &Caller,
        request: UpdatePreferencesRequest,
    ) -> Result<MessageDto, Error> {
        let preferences = request
            .preferences
            .ok_or_else(|| RequestError::invalid("Preferences are required"))?;

        let updated = CivicUserRepository::new(self.db)
            .update_preferences(&caller.uid, &preferences)
            .await?;
        if updated == 0 {
            return Err(RequestError::NotFound("User profile not found".to_string()).into());
        }

        Ok(MessageDto::success("Preferences updated successfully"))
    }

    /// Stores the caller's push device token.
    pub async fn update_fcm_token(
        &self,
        caller: &Caller,
        token: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<MessageDto, Error> {
        let token = required(token, "FCM token is required")?;

        let updated = CivicUserRepository::new(self.db)
            .set_fcm_token(&caller.uid, &token, now.naive_utc())
            .await?;
        if updated == 0 {
            return Err(RequestError::NotFound("User profile not found".to_string()).into());
        }

        Ok(MessageDto::success("FCM token updated successfully"))
    }
}

fn clamp_i32(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
