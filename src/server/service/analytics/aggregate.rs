//! Pure aggregation over issue records.

use std::collections::BTreeMap;

use crate::server::model::{
    db::IssueModel,
    issue::{IssueStatus, EMERGENCY_PRIORITY, UNASSIGNED_DEPARTMENT},
};

/// Counts and averages over a set of issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueMetrics {
    pub total: u64,
    pub resolved: u64,
    /// Submitted, acknowledged or in progress. Unknown statuses count as neither.
    pub pending: u64,
    pub emergency: u64,
    pub by_category: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    /// Whole hours, truncated toward zero
    pub average_resolution_hours: i64,
    /// Rounded to one decimal, 0 without feedback
    pub average_rating: f64,
}

impl IssueMetrics {
    pub fn from_issues(issues: &[IssueModel]) -> Self {
        let mut metrics = Self {
            total: issues.len() as u64,
            ..Self::default()
        };

        let mut ratings = Vec::new();
        for issue in issues {
            match IssueStatus::parse(&issue.status) {
                Some(IssueStatus::Resolved) => metrics.resolved += 1,
                Some(status) if status.is_pending() => metrics.pending += 1,
                _ => {}
            }
            if issue.priority == EMERGENCY_PRIORITY {
                metrics.emergency += 1;
            }
            *metrics.by_category.entry(issue.category.clone()).or_default() += 1;
            *metrics.by_priority.entry(issue.priority.clone()).or_default() += 1;
            if let Some(rating) = issue.feedback_rating {
                ratings.push(f64::from(rating));
            }
        }

        metrics.average_resolution_hours = average_resolution_hours(issues);
        if !ratings.is_empty() {
            let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
            metrics.average_rating = (mean * 10.0).round() / 10.0;
        }

        metrics
    }

    /// Percentage of resolved issues, 0 for an empty set.
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        self.resolved as f64 / self.total as f64 * 100.0
    }
}

/// Mean latency between creation and resolution of resolved issues, in whole hours.
///
/// Issues missing a resolution timestamp are ignored; 0 when none qualify.
pub fn average_resolution_hours(issues: &[IssueModel]) -> i64 {
    let latencies: Vec<i64> = issues
        .iter()
        .filter(|issue| IssueStatus::parse(&issue.status) == Some(IssueStatus::Resolved))
        .filter_map(|issue| {
            issue
                .resolved_at
                .map(|resolved_at| (resolved_at - issue.created_at).num_seconds())
        })
        .collect();

    if latencies.is_empty() {
        return 0;
    }

    let mean_seconds = latencies.iter().sum::<i64>() as f64 / latencies.len() as f64;
    (mean_seconds / 3600.0).trunc() as i64
}

/// Per-department totals for the performance report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentMetrics {
    pub total: u64,
    pub resolved: u64,
    pub average_resolution_hours: i64,
}

/// Groups issues by assigned department, with unassigned issues under `unassigned`.
pub fn department_metrics(issues: &[IssueModel]) -> BTreeMap<String, DepartmentMetrics> {
    let mut groups: BTreeMap<String, Vec<IssueModel>> = BTreeMap::new();
    for issue in issues {
        let department = issue
            .assigned_department
            .clone()
            .unwrap_or_else(|| UNASSIGNED_DEPARTMENT.to_string());
        groups.entry(department).or_default().push(issue.clone());
    }

    groups
        .into_iter()
        .map(|(department, issues)| {
            let resolved = issues
                .iter()
                .filter(|issue| IssueStatus::parse(&issue.status) == Some(IssueStatus::Resolved))
                .count() as u64;

            let metrics = DepartmentMetrics {
                total: issues.len() as u64,
                resolved,
                average_resolution_hours: average_resolution_hours(&issues),
            };

            (department, metrics)
        })
        .collect()
}
