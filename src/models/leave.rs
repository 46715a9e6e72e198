//! Leave request models.
//!
//! This module contains the [`LeaveApplication`] submitted by an employee,
//! the [`LeaveRecord`] entries of their leave history and the enums that
//! describe status and duration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Workflow status of a leave request.
///
/// # Example
///
/// ```
/// use hrms_engine::models::LeaveStatus;
///
/// assert!(LeaveStatus::ManagerApproved.is_active());
/// assert!(!LeaveStatus::Rejected.is_active());
/// assert_eq!(LeaveStatus::ManagerApproved.to_string(), "manager_approved");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted, awaiting the manager.
    Pending,
    /// Approved by the manager, awaiting HR.
    ManagerApproved,
    /// Approved by HR.
    Approved,
    /// The leave has been taken.
    Completed,
    /// Rejected by the manager or HR.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::ManagerApproved => "manager_approved",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Completed => "completed",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true for statuses that block an overlapping request.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            LeaveStatus::Pending | LeaveStatus::ManagerApproved | LeaveStatus::Approved
        )
    }

    /// Returns true for statuses that start the cooldown period.
    pub fn starts_cooldown(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Completed)
    }

    /// Returns true for statuses that consume entitlement.
    pub fn counts_toward_usage(&self) -> bool {
        !matches!(self, LeaveStatus::Rejected | LeaveStatus::Cancelled)
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a request covers whole days or ends on a half day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// Every day in the range is a full day.
    #[default]
    WholeDay,
    /// Half a day is deducted from the range.
    HalfDay,
}

/// Which half of the day a half-day leave covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfDayPeriod {
    /// Morning.
    Am,
    /// Afternoon.
    Pm,
}

/// A leave request as submitted by the employee, before evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// The leave type name (e.g., "Sick Leave").
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Whole or half day.
    #[serde(default)]
    pub duration: DurationMode,
    /// Half-day period, required when `duration` is half day.
    #[serde(default)]
    pub half_day_period: Option<HalfDayPeriod>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// An entry of the employee's leave history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier of the request.
    pub id: String,
    /// The leave type name.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Total days requested.
    pub days: Decimal,
    /// Days that were granted with pay, when the split is known.
    #[serde(default)]
    pub with_pay_days: Option<Decimal>,
    /// Current workflow status.
    pub status: LeaveStatus,
}

impl LeaveRecord {
    /// Returns the number of paid days this record consumes.
    pub fn paid_days(&self) -> Decimal {
        self.with_pay_days.unwrap_or(self.days)
    }

    /// Returns true if the inclusive range `[start, end]` shares a day with this record.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }
}
