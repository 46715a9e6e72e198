//! Leave request preview.
//!
//! Runs every leave rule in order for one pending request and assembles
//! the [`LeavePreview`] shown in the confirmation dialog.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, Employee, LeaveApplication, LeavePreview, LeaveRecord,
    LeaveUsageSummary,
};

use super::{
    build_usage_summary, calculate_payment_breakdown, classify_tenure, count_leave_days,
    validate_day_limit, validate_schedule,
};

/// Evaluates a leave application against the employee's history.
///
/// Steps: tenure, day count, day limit, overlap and cooldown, usage summary,
/// payment breakdown. The first failing rule aborts the preview.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::preview_leave_request;
/// use hrms_engine::config::ConfigLoader;
/// use hrms_engine::models::{DurationMode, Employee, LeaveApplication};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Santos".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     department: None,
/// };
/// let application = LeaveApplication {
///     leave_type: "Vacation Leave".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 4, 8).unwrap(),
///     duration: DurationMode::WholeDay,
///     half_day_period: None,
///     reason: Some("Family trip".to_string()),
/// };
///
/// let preview = preview_leave_request(
///     &employee,
///     &application,
///     &[],
///     NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
///     &ConfigLoader::default(),
/// ).unwrap();
/// assert_eq!(preview.day_count.days, Decimal::from(3));
/// assert_eq!(preview.breakdown.with_pay_days, Decimal::from(3));
/// ```
pub fn preview_leave_request(
    employee: &Employee,
    application: &LeaveApplication,
    history: &[LeaveRecord],
    as_of: NaiveDate,
    config: &ConfigLoader,
) -> EngineResult<LeavePreview> {
    let start_time = Instant::now();
    let policy = config.policy();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let tenure = classify_tenure(
        employee.hire_date,
        as_of,
        policy.tenure.paid_leave_threshold_months,
        step_number,
    )?;
    steps.push(tenure.audit_step);
    step_number += 1;

    if !tenure.eligible_for_paid_leave {
        warnings.push(AuditWarning {
            code: "TENURE_BELOW_THRESHOLD".to_string(),
            message: format!(
                "{} months of service; paid leave starts at {} months",
                tenure.tenure.months, policy.tenure.paid_leave_threshold_months
            ),
            severity: "medium".to_string(),
        });
    }

    let day_count = count_leave_days(
        application.start_date,
        application.end_date,
        application.duration,
        application.half_day_period,
        policy.leave.hours_per_day,
        step_number,
    )?;
    steps.push(day_count.audit_step);
    step_number += 1;
    let requested = day_count.day_count.days;

    let limit = validate_day_limit(
        &application.leave_type,
        requested,
        config.catalog(),
        step_number,
    )?;
    steps.push(limit.audit_step);
    warnings.extend(limit.warning);
    step_number += 1;

    let schedule = validate_schedule(
        application.start_date,
        application.end_date,
        history,
        policy.leave.cooldown_days,
        step_number,
    );
    schedule.outcome?;
    steps.push(schedule.audit_step);
    step_number += 1;

    let usage = build_usage_summary(
        &employee.id,
        history,
        &tenure.tenure,
        config.catalog(),
        policy,
        step_number,
    );
    steps.push(usage.audit_step);
    step_number += 1;

    let breakdown = calculate_payment_breakdown(
        &application.leave_type,
        requested,
        &tenure.tenure,
        &usage.summary,
        policy,
        step_number,
    )?;
    steps.push(breakdown.audit_step);
    warnings.extend(breakdown.warning);

    debug!(
        employee_id = %employee.id,
        leave_type = %application.leave_type,
        requested_days = %requested,
        with_pay_days = %breakdown.breakdown.with_pay_days,
        "Leave preview evaluated"
    );

    Ok(LeavePreview {
        preview_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id.clone(),
        leave_type: application.leave_type.clone(),
        day_count: day_count.day_count,
        tenure: tenure.tenure,
        usage: usage.summary,
        breakdown: breakdown.breakdown,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Builds the usage summary alone, for the balance screen.
pub fn summarize_balances(
    employee: &Employee,
    history: &[LeaveRecord],
    as_of: NaiveDate,
    config: &ConfigLoader,
) -> EngineResult<LeaveUsageSummary> {
    let policy = config.policy();
    let tenure = classify_tenure(
        employee.hire_date,
        as_of,
        policy.tenure.paid_leave_threshold_months,
        1,
    )?;

    Ok(build_usage_summary(
        &employee.id,
        history,
        &tenure.tenure,
        config.catalog(),
        policy,
        2,
    )
    .summary)
}
