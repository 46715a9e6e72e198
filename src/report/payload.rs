//! Manager evaluation report payload.
//!
//! The payload arrives pre-aggregated; the renderer only lays it out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline numbers for the report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationStatistics {
    /// Evaluations in scope.
    pub total_evaluations: u32,
    /// Evaluations signed off.
    pub completed: u32,
    /// Evaluations still open.
    pub pending: u32,
    /// Mean overall rating.
    pub average_rating: Decimal,
    /// Best overall rating.
    #[serde(default)]
    pub highest_rating: Option<Decimal>,
    /// Worst overall rating.
    #[serde(default)]
    pub lowest_rating: Option<Decimal>,
}

/// One bar of the rating distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    /// Bucket label (e.g., "Outstanding").
    pub label: String,
    /// Evaluations in the bucket.
    pub count: u32,
}

/// Per-department figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentAnalytics {
    /// Department name.
    pub department: String,
    /// Evaluations in the department.
    pub evaluations: u32,
    /// Mean overall rating in the department.
    pub average_rating: Decimal,
}

/// Breakdown tables for the report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationAnalytics {
    /// Rating distribution.
    #[serde(default)]
    pub rating_distribution: Vec<RatingBucket>,
    /// Department breakdown.
    #[serde(default)]
    pub departments: Vec<DepartmentAnalytics>,
}

/// A single evaluation detail row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Name of the evaluating manager.
    pub evaluator: String,
    /// Evaluation period label (e.g., "2026 H1").
    pub period: String,
    /// Overall rating on a 1-5 scale.
    pub overall_rating: Decimal,
    /// Workflow status.
    pub status: String,
    /// When the evaluation was submitted.
    #[serde(default)]
    pub evaluated_on: Option<NaiveDate>,
}

/// Filters the report was generated with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Department filter.
    #[serde(default)]
    pub department: Option<String>,
    /// Period filter.
    #[serde(default)]
    pub period: Option<String>,
    /// Status filter.
    #[serde(default)]
    pub status: Option<String>,
    /// Lower date bound.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Upper date bound.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl ReportFilters {
    /// Returns `(label, value)` pairs for the filters that are set.
    pub fn active(&self) -> Vec<(&'static str, String)> {
        let mut active = Vec::new();
        if let Some(department) = &self.department {
            active.push(("Department", department.clone()));
        }
        if let Some(period) = &self.period {
            active.push(("Period", period.clone()));
        }
        if let Some(status) = &self.status {
            active.push(("Status", status.clone()));
        }
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => active.push(("Dates", format!("{} to {}", from, to))),
            (Some(from), None) => active.push(("Dates", format!("from {}", from))),
            (None, Some(to)) => active.push(("Dates", format!("until {}", to))),
            (None, None) => {}
        }
        active
    }
}

/// Everything the evaluation report renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    /// Headline numbers.
    pub statistics: EvaluationStatistics,
    /// Breakdown tables.
    #[serde(default)]
    pub analytics: EvaluationAnalytics,
    /// Free-text observations.
    #[serde(default)]
    pub insights: Vec<String>,
    /// Detail rows.
    #[serde(default)]
    pub evaluations: Vec<EvaluationRecord>,
    /// Filters applied.
    #[serde(default)]
    pub filters: ReportFilters,
    /// When the payload was aggregated.
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_payload() {
        let json = r#"{
            "statistics": {
                "total_evaluations": 0,
                "completed": 0,
                "pending": 0,
                "average_rating": "0"
            },
            "generated_at": "2026-03-20T09:00:00Z"
        }"#;

        let payload: ReportPayload = serde_json::from_str(json).unwrap();
        assert!(payload.evaluations.is_empty());
        assert!(payload.filters.active().is_empty());
    }

    #[test]
    fn test_active_filters() {
        let filters = ReportFilters {
            department: Some("Finance".to_string()),
            date_from: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Default::default()
        };
        let active = filters.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0], ("Department", "Finance".to_string()));
        assert_eq!(active[1], ("Dates", "from 2026-01-01".to_string()));
    }
}
