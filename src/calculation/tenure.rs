//! Tenure classification.
//!
//! Converts a hire date into whole months of service, which decides whether
//! an employee's leave can be paid at all.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TenureRecord};

/// The result of classifying tenure, including the audit step.
#[derive(Debug, Clone)]
pub struct TenureResult {
    /// The computed tenure.
    pub tenure: TenureRecord,
    /// Whether the paid-leave threshold is met.
    pub eligible_for_paid_leave: bool,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Counts whole calendar months between `hire_date` and `as_of`.
///
/// A month is complete once the day-of-month of the hire date is reached
/// again. Hires on the 31st complete a month on the last day of shorter
/// months.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::months_of_service;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// assert_eq!(months_of_service(hired, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()), 13);
/// assert_eq!(months_of_service(hired, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()), 14);
/// ```
pub fn months_of_service(hire_date: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of <= hire_date {
        return 0;
    }

    let mut months = (as_of.year() - hire_date.year()) * 12 + as_of.month() as i32
        - hire_date.month() as i32;

    if as_of.day() < hire_date.day() && !is_last_day_of_month(as_of) {
        months -= 1;
    }

    months.max(0) as u32
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

/// Classifies an employee's tenure at `as_of`.
///
/// # Errors
///
/// Returns `InvalidEmployee` if the hire date is after `as_of`.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::classify_tenure;
/// use chrono::NaiveDate;
///
/// let result = classify_tenure(
///     NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
///     12,
///     1,
/// ).unwrap();
/// assert_eq!(result.tenure.months, 14);
/// assert!(result.eligible_for_paid_leave);
/// ```
pub fn classify_tenure(
    hire_date: NaiveDate,
    as_of: NaiveDate,
    threshold_months: u32,
    step_number: u32,
) -> EngineResult<TenureResult> {
    if hire_date > as_of {
        return Err(EngineError::InvalidEmployee {
            field: "hire_date".to_string(),
            message: format!("hire date {} is after {}", hire_date, as_of),
        });
    }

    let months = months_of_service(hire_date, as_of);
    let tenure = TenureRecord {
        hire_date,
        as_of,
        months,
    };
    let eligible = tenure.meets(threshold_months);

    let reasoning = if eligible {
        format!(
            "{} months of service meets the {}-month threshold; paid leave available",
            months, threshold_months
        )
    } else {
        format!(
            "{} months of service is below the {}-month threshold; leave is without pay",
            months, threshold_months
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tenure_classification".to_string(),
        rule_name: "Tenure Classification".to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "as_of": as_of.to_string(),
            "threshold_months": threshold_months
        }),
        output: serde_json::json!({
            "months": months,
            "eligible_for_paid_leave": eligible
        }),
        reasoning,
    };

    Ok(TenureResult {
        tenure,
        eligible_for_paid_leave: eligible,
        audit_step,
    })
}
