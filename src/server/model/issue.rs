//! Names for the string values stored on issue records.

/// Progress of an issue. Other status values may exist in the data and are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatus {
    Submitted,
    Acknowledged,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Acknowledged => "acknowledged",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "acknowledged" => Some(Self::Acknowledged),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Submitted, acknowledged and in-progress issues count as pending.
    pub fn is_pending(&self) -> bool {
        !matches!(self, Self::Resolved)
    }
}

/// Priority tier that marks an issue as an emergency.
pub const EMERGENCY_PRIORITY: &str = "emergency";

/// Department bucket for issues without an assigned department.
pub const UNASSIGNED_DEPARTMENT: &str = "unassigned";

/// Sentinel identity written over the reporter fields of a deleted account's issues.
pub mod deleted_reporter {
    pub const ID: &str = "deleted_user";
    pub const NAME: &str = "Deleted User";
    pub const EMAIL: &str = "deleted@example.com";
}
