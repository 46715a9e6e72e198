//! Employee model and tenure record.
//!
//! This module defines the Employee struct and the TenureRecord derived
//! from an employee's hire date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee whose leave is being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The department the employee belongs to, if known.
    #[serde(default)]
    pub department: Option<String>,
}

/// Service duration of an employee at a given date.
///
/// Never stored; recomputed from the hire date on every evaluation.
///
/// # Example
///
/// ```
/// use hrms_engine::models::TenureRecord;
/// use chrono::NaiveDate;
///
/// let tenure = TenureRecord {
///     hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     as_of: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
///     months: 14,
/// };
/// assert!(tenure.meets(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureRecord {
    /// The employee's hire date.
    pub hire_date: NaiveDate,
    /// The date the tenure was evaluated at.
    pub as_of: NaiveDate,
    /// Whole months of service.
    pub months: u32,
}

impl TenureRecord {
    /// Returns true if the tenure is at least `threshold_months`.
    pub fn meets(&self, threshold_months: u32) -> bool {
        self.months >= threshold_months
    }
}
