//! Audience selection and notification log kinds.

use crate::server::model::auth::Role;

/// Logical recipient group of a bulk notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Audience {
    #[default]
    All,
    Citizens,
    Authorities,
}

impl Audience {
    /// Parses the caller's value; anything unrecognised targets every active user.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("citizens") => Self::Citizens,
            Some("authorities") => Self::Authorities,
            _ => Self::All,
        }
    }

    /// Role the audience is restricted to, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::All => None,
            Self::Citizens => Some(Role::Citizen),
            Self::Authorities => Some(Role::Authority),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Citizens => "citizens",
            Self::Authorities => "authorities",
        }
    }
}

/// Kind recorded on a notification log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Bulk,
    Emergency,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bulk => "bulk",
            Self::Emergency => "emergency",
        }
    }
}
