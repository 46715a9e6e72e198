//! Request types for the HRMS leave API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, LeaveApplication, LeaveRecord};

/// Request body for `POST /leave-requests/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The applying employee.
    pub employee: Employee,
    /// The leave being applied for.
    pub application: LeaveApplication,
    /// The employee's existing requests.
    #[serde(default)]
    pub history: Vec<LeaveRecord>,
    /// Evaluation date; defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for `POST /leave-balances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// The employee.
    pub employee: Employee,
    /// The employee's existing requests.
    #[serde(default)]
    pub history: Vec<LeaveRecord>,
    /// Evaluation date; defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationMode, LeaveStatus};

    #[test]
    fn test_deserialize_preview_request() {
        let json = r#"{
            "employee": {
                "id": "emp_001",
                "name": "Maria Santos",
                "hire_date": "2025-01-15"
            },
            "application": {
                "leave_type": "Sick Leave",
                "start_date": "2026-03-23",
                "end_date": "2026-03-27"
            },
            "history": [
                {
                    "id": "lr_1",
                    "leave_type": "Sick Leave",
                    "start_date": "2026-01-12",
                    "end_date": "2026-01-17",
                    "days": "6",
                    "status": "approved"
                }
            ],
            "as_of": "2026-03-20"
        }"#;

        let request: PreviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee.id, "emp_001");
        assert_eq!(request.application.duration, DurationMode::WholeDay);
        assert_eq!(request.history[0].status, LeaveStatus::Approved);
        assert_eq!(request.as_of, NaiveDate::from_ymd_opt(2026, 3, 20));
    }

    #[test]
    fn test_balance_request_defaults() {
        let json = r#"{
            "employee": {"id": "emp_002", "name": "Jose Cruz", "hire_date": "2020-06-01"}
        }"#;

        let request: BalanceRequest = serde_json::from_str(json).unwrap();
        assert!(request.history.is_empty());
        assert!(request.as_of.is_none());
    }
}
