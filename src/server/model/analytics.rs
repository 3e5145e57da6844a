use chrono::Duration;

/// Look-back window for dashboard analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
}

impl TimeRange {
    /// Parses the caller's value; unknown or missing values fall back to a month.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("week") => Self::Week,
            Some("year") => Self::Year,
            _ => Self::Month,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
            Self::Year => Duration::days(365),
        }
    }
}
