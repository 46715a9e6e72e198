//! Leave day counting.
//!
//! Counts the calendar days covered by a leave request, honouring half-day
//! requests, and converts them to hours.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DayCount, DurationMode, HalfDayPeriod};

/// Half a leave day.
pub const HALF_DAY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Default working hours in a leave day.
pub const DEFAULT_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The result of counting leave days, including the audit step.
#[derive(Debug, Clone)]
pub struct DayCountResult {
    /// Days and hours covered.
    pub day_count: DayCount,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Counts the days and hours covered by a leave request.
///
/// Every calendar day in `[start, end]` counts. A half-day request deducts
/// half a day from the total, so a single half day is 0.5.
///
/// # Errors
///
/// - `InvalidDateRange` when `end` is before `start`.
/// - `InvalidLeaveRequest` when a half-day request has no period.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::{count_leave_days, DEFAULT_HOURS_PER_DAY};
/// use hrms_engine::models::DurationMode;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// let result = count_leave_days(start, end, DurationMode::WholeDay, None, DEFAULT_HOURS_PER_DAY, 1).unwrap();
/// assert_eq!(result.day_count.days, Decimal::from(3));
/// assert_eq!(result.day_count.hours, Decimal::from(24));
/// ```
pub fn count_leave_days(
    start: NaiveDate,
    end: NaiveDate,
    duration: DurationMode,
    half_day_period: Option<HalfDayPeriod>,
    hours_per_day: Decimal,
    step_number: u32,
) -> EngineResult<DayCountResult> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    if duration == DurationMode::HalfDay && half_day_period.is_none() {
        return Err(EngineError::InvalidLeaveRequest {
            field: "half_day_period".to_string(),
            message: "a half-day request must specify am or pm".to_string(),
        });
    }

    let calendar_days = Decimal::from((end - start).num_days() + 1);
    let days = match duration {
        DurationMode::WholeDay => calendar_days,
        DurationMode::HalfDay => calendar_days - HALF_DAY,
    };
    let hours = days * hours_per_day;

    let period = match duration {
        DurationMode::WholeDay => None,
        DurationMode::HalfDay => half_day_period,
    };

    let reasoning = match duration {
        DurationMode::WholeDay => format!(
            "{} to {} covers {} days x {}h = {}h",
            start,
            end,
            days.normalize(),
            hours_per_day.normalize(),
            hours.normalize()
        ),
        DurationMode::HalfDay => format!(
            "{} to {} covers {} calendar days less a half day = {} days x {}h = {}h",
            start,
            end,
            calendar_days,
            days.normalize(),
            hours_per_day.normalize(),
            hours.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_day_count".to_string(),
        rule_name: "Leave Day Count".to_string(),
        input: serde_json::json!({
            "start_date": start.to_string(),
            "end_date": end.to_string(),
            "duration": duration,
            "half_day_period": period
        }),
        output: serde_json::json!({
            "days": days.normalize().to_string(),
            "hours": hours.normalize().to_string()
        }),
        reasoning,
    };

    Ok(DayCountResult {
        day_count: DayCount {
            days,
            hours,
            duration,
            half_day_period: period,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn count(start: NaiveDate, end: NaiveDate, duration: DurationMode) -> EngineResult<DayCount> {
        let period = match duration {
            DurationMode::WholeDay => None,
            DurationMode::HalfDay => Some(HalfDayPeriod::Am),
        };
        count_leave_days(start, end, duration, period, DEFAULT_HOURS_PER_DAY, 1)
            .map(|r| r.day_count)
    }

    #[test]
    fn test_half_day_constant() {
        assert_eq!(HALF_DAY, Decimal::new(5, 1));
        assert_eq!(DEFAULT_HOURS_PER_DAY, Decimal::from(8));
    }

    #[test]
    fn test_single_whole_day_is_one_day() {
        let result = count(date(2026, 3, 2), date(2026, 3, 2), DurationMode::WholeDay).unwrap();
        assert_eq!(result.days, Decimal::ONE);
        assert_eq!(result.hours, Decimal::from(8));
    }

    #[test]
    fn test_single_half_day_is_half() {
        let result = count(date(2026, 3, 2), date(2026, 3, 2), DurationMode::HalfDay).unwrap();
        assert_eq!(result.days, Decimal::new(5, 1));
        assert_eq!(result.hours, Decimal::from(4));
        assert_eq!(result.half_day_period, Some(HalfDayPeriod::Am));
    }

    #[test]
    fn test_three_day_range() {
        let result = count(date(2026, 3, 2), date(2026, 3, 4), DurationMode::WholeDay).unwrap();
        assert_eq!(result.days, Decimal::from(3));
        assert_eq!(result.hours, Decimal::from(24));
    }

    #[test]
    fn test_multi_day_half_day_deducts_half() {
        let result = count(date(2026, 3, 2), date(2026, 3, 4), DurationMode::HalfDay).unwrap();
        assert_eq!(result.days, Decimal::new(25, 1));
        assert_eq!(result.hours, Decimal::from(20));
    }

    #[test]
    fn test_range_across_month_end() {
        let result = count(date(2026, 1, 30), date(2026, 2, 2), DurationMode::WholeDay).unwrap();
        assert_eq!(result.days, Decimal::from(4));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        match count(date(2026, 3, 4), date(2026, 3, 2), DurationMode::WholeDay) {
            Err(EngineError::InvalidDateRange { start, end }) => {
                assert_eq!(start, date(2026, 3, 4));
                assert_eq!(end, date(2026, 3, 2));
            }
            other => panic!("Expected InvalidDateRange, got {:?}", other),
        }
    }

    #[test]
    fn test_half_day_without_period_is_rejected() {
        let result = count_leave_days(
            date(2026, 3, 2),
            date(2026, 3, 2),
            DurationMode::HalfDay,
            None,
            DEFAULT_HOURS_PER_DAY,
            1,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidLeaveRequest { ref field, .. }) if field == "half_day_period"
        ));
    }

    #[test]
    fn test_whole_day_drops_half_day_period() {
        let result = count_leave_days(
            date(2026, 3, 2),
            date(2026, 3, 3),
            DurationMode::WholeDay,
            Some(HalfDayPeriod::Pm),
            DEFAULT_HOURS_PER_DAY,
            1,
        )
        .unwrap();
        assert!(result.day_count.half_day_period.is_none());
    }

    #[test]
    fn test_audit_step_reasoning() {
        let result = count_leave_days(
            date(2026, 3, 2),
            date(2026, 3, 4),
            DurationMode::WholeDay,
            None,
            DEFAULT_HOURS_PER_DAY,
            2,
        )
        .unwrap();
        assert_eq!(result.audit_step.rule_id, "leave_day_count");
        assert_eq!(result.audit_step.output["days"], "3");
        assert!(result.audit_step.reasoning.contains("3 days x 8h = 24h"));
    }

    proptest! {
        #[test]
        fn prop_single_day_counts(offset in 0i64..20_000) {
            let start = date(1990, 1, 1) + chrono::Duration::days(offset);
            prop_assert_eq!(count(start, start, DurationMode::WholeDay).unwrap().days, Decimal::ONE);
            prop_assert_eq!(count(start, start, DurationMode::HalfDay).unwrap().days, HALF_DAY);
        }

        #[test]
        fn prop_hours_are_days_times_eight(offset in 0i64..20_000, span in 0i64..400) {
            let start = date(1990, 1, 1) + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(span);
            let result = count(start, end, DurationMode::WholeDay).unwrap();
            prop_assert_eq!(result.days, Decimal::from(span + 1));
            prop_assert_eq!(result.hours, result.days * Decimal::from(8));
        }
    }
}
