//! Typed roles, permissions, and the authenticated caller.

use std::{fmt, str::FromStr};

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::server::{
    error::{auth::AuthError, Error},
    model::app::AppState,
};

/// Role carried in the caller's authorization claim and mirrored on the profile record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// New accounts start with the lowest privilege tier
    #[default]
    Citizen,
    Authority,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Authority => "authority",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Self::Citizen),
            "authority" => Ok(Self::Authority),
            "admin" => Ok(Self::Admin),
            other => Err(Error::ParseError(format!("unknown role {other:?}"))),
        }
    }
}

/// Privileged operations, each gated by [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ViewDashboard,
    ViewPerformance,
    ExportAnalytics,
    SendBulkNotification,
    SendEmergencyAlert,
    ManageRoles,
}

impl Permission {
    /// Whether `role` is allowed to perform this operation.
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Self::ViewDashboard | Self::SendEmergencyAlert => {
                matches!(role, Role::Authority | Role::Admin)
            }
            Self::ViewPerformance
            | Self::ExportAnalytics
            | Self::SendBulkNotification
            | Self::ManageRoles => role == Role::Admin,
        }
    }

    pub fn denied_message(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "Only authorities can access analytics",
            Self::ViewPerformance => "Only admins can access performance metrics",
            Self::ExportAnalytics => "Only admins can export analytics data",
            Self::SendBulkNotification => "Only admins can send bulk notifications",
            Self::SendEmergencyAlert => "Only authorities can send emergency alerts",
            Self::ManageRoles => "Only admins can update user roles",
        }
    }
}

/// Claims of a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account identity
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: u64,
}

/// Authenticated caller of a callable operation.
///
/// Extracted from the `Authorization: Bearer` header; requests without a valid token are
/// rejected as unauthenticated before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub uid: String,
    /// `None` when the claim is absent or names an unknown role
    pub role: Option<Role>,
}

impl Caller {
    pub fn new(uid: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            uid: uid.into(),
            role,
        }
    }
}

impl From<TokenClaims> for Caller {
    fn from(claims: TokenClaims) -> Self {
        let role = claims.role.as_deref().and_then(|r| r.parse().ok());

        Self {
            uid: claims.sub,
            role,
        }
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::Unauthenticated)?;

        let claims = state.token_verifier.verify(token)?;

        Ok(Caller::from(claims))
    }
}

/// Checks that the caller's role grants `permission`.
///
/// # Returns
/// - `Ok(())` - The caller may proceed
/// - `Err(AuthError::PermissionDenied)` - The caller has no role or one that does not qualify
pub fn authorize(caller: &Caller, permission: Permission) -> Result<(), AuthError> {
    match caller.role {
        Some(role) if permission.allows(role) => Ok(()),
        _ => Err(AuthError::PermissionDenied(permission)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_may_view_dashboard_but_not_export() {
        let caller = Caller::new("u1", Some(Role::Authority));

        assert!(authorize(&caller, Permission::ViewDashboard).is_ok());
        assert!(authorize(&caller, Permission::SendEmergencyAlert).is_ok());
        assert!(matches!(
            authorize(&caller, Permission::ExportAnalytics),
            Err(AuthError::PermissionDenied(Permission::ExportAnalytics))
        ));
    }

    #[test]
    fn admin_holds_every_permission() {
        let caller = Caller::new("admin", Some(Role::Admin));

        for permission in [
            Permission::ViewDashboard,
            Permission::ViewPerformance,
            Permission::ExportAnalytics,
            Permission::SendBulkNotification,
            Permission::SendEmergencyAlert,
            Permission::ManageRoles,
        ] {
            assert!(authorize(&caller, permission).is_ok());
        }
    }

    #[test]
    fn missing_role_is_denied() {
        let caller = Caller::new("u1", None);

        assert!(authorize(&caller, Permission::ViewDashboard).is_err());
    }

    #[test]
    fn unknown_role_claim_maps_to_none() {
        let caller = Caller::from(TokenClaims {
            sub: "u1".to_string(),
            role: Some("superuser".to_string()),
            exp: 0,
        });

        assert_eq!(caller.role, None);
    }

    #[test]
    fn role_round_trips_through_string_form() {
        assert_eq!("authority".parse::<Role>().ok(), Some(Role::Authority));
        assert!("Admin".parse::<Role>().is_err());
        assert_eq!(Role::default().as_str(), "citizen");
    }
}
