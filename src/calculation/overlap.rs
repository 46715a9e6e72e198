//! Overlap and cooldown validation.
//!
//! A new request may not share a day with an active request, and may not
//! start until the cooldown after the previous approved leave has passed.

use chrono::{Days, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, LeaveRecord};

/// Default waiting period after an approved leave ends, in calendar days.
pub const DEFAULT_COOLDOWN_DAYS: i64 = 7;

/// Rejects a range that intersects any pending, manager-approved or
/// approved request.
///
/// The first conflicting record in history order is reported.
pub fn check_overlap(start: NaiveDate, end: NaiveDate, history: &[LeaveRecord]) -> EngineResult<()> {
    match history
        .iter()
        .find(|r| r.status.is_active() && r.intersects(start, end))
    {
        Some(conflict) => Err(EngineError::OverlappingLeave {
            existing_start: conflict.start_date,
            existing_end: conflict.end_date,
            status: conflict.status,
        }),
        None => Ok(()),
    }
}

/// Returns the previous leave's end and the first date a new leave may
/// start, if a cooldown applies.
///
/// The cooldown follows the most recent approved or completed leave that
/// started on or before `start`.
///
/// # Errors
///
/// `InvalidLeaveRequest` on `history` when the eligible date falls past the
/// last representable date.
pub fn cooldown_eligible_date(
    start: NaiveDate,
    history: &[LeaveRecord],
    cooldown_days: i64,
) -> EngineResult<Option<(NaiveDate, NaiveDate)>> {
    let Some(previous_end) = history
        .iter()
        .filter(|r| r.status.starts_cooldown() && r.start_date <= start)
        .map(|r| r.end_date)
        .max()
    else {
        return Ok(None);
    };

    let eligible_date = previous_end
        .checked_add_days(Days::new(cooldown_days.max(0) as u64))
        .ok_or_else(|| EngineError::InvalidLeaveRequest {
            field: "history".to_string(),
            message: format!(
                "a leave ending {} is too far in the future to schedule after",
                previous_end
            ),
        })?;

    Ok(Some((previous_end, eligible_date)))
}

/// Rejects a start date that falls inside the cooldown window.
pub fn check_cooldown(start: NaiveDate, history: &[LeaveRecord], cooldown_days: i64) -> EngineResult<()> {
    match cooldown_eligible_date(start, history, cooldown_days)? {
        Some((previous_end, eligible_date)) if start < eligible_date => {
            Err(EngineError::CooldownActive {
                previous_end,
                eligible_date,
            })
        }
        _ => Ok(()),
    }
}

/// Validates a requested range against overlap and cooldown rules.
///
/// Overlap is checked first.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::{validate_schedule, DEFAULT_COOLDOWN_DAYS};
/// use hrms_engine::models::{LeaveRecord, LeaveStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
/// let history = vec![LeaveRecord {
///     id: "lr_1".to_string(),
///     leave_type: "Vacation Leave".to_string(),
///     start_date: d(2),
///     end_date: d(4),
///     days: Decimal::from(3),
///     with_pay_days: None,
///     status: LeaveStatus::Approved,
/// }];
///
/// assert!(validate_schedule(d(10), d(10), &history, DEFAULT_COOLDOWN_DAYS, 1).is_refused());
/// assert!(validate_schedule(d(11), d(12), &history, DEFAULT_COOLDOWN_DAYS, 1).is_ok());
/// ```
pub fn validate_schedule(
    start: NaiveDate,
    end: NaiveDate,
    history: &[LeaveRecord],
    cooldown_days: i64,
    step_number: u32,
) -> ScheduleCheck {
    let outcome = check_overlap(start, end, history)
        .and_then(|_| check_cooldown(start, history, cooldown_days));

    let eligible_from = cooldown_eligible_date(start, history, cooldown_days)
        .ok()
        .flatten()
        .map(|(_, d)| d);

    let reasoning = match &outcome {
        Ok(()) => match eligible_from {
            Some(date) => format!(
                "No active request overlaps {} to {}; start is on or after the cooldown date {}",
                start, end, date
            ),
            None => format!(
                "No active request overlaps {} to {}; no prior approved leave",
                start, end
            ),
        },
        Err(err) => err.to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_schedule".to_string(),
        rule_name: "Overlap and Cooldown".to_string(),
        input: serde_json::json!({
            "start_date": start.to_string(),
            "end_date": end.to_string(),
            "history_records": history.len(),
            "cooldown_days": cooldown_days
        }),
        output: serde_json::json!({
            "accepted": outcome.is_ok(),
            "eligible_from": eligible_from.map(|d| d.to_string())
        }),
        reasoning,
    };

    ScheduleCheck {
        outcome,
        audit_step,
    }
}

/// Outcome of [`validate_schedule`], with the audit step for either result.
#[derive(Debug)]
pub struct ScheduleCheck {
    /// `Ok` when the range is schedulable.
    pub outcome: EngineResult<()>,
    /// The audit step recording the check.
    pub audit_step: AuditStep,
}

impl ScheduleCheck {
    /// Returns true when the range was accepted.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns true when the range was refused.
    pub fn is_refused(&self) -> bool {
        self.outcome.is_err()
    }
}
