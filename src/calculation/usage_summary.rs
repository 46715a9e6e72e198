//! Leave usage summary.
//!
//! Rebuilds per-type and SIL counters for the current calendar year from the
//! employee's leave history.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::{LeaveTypeCatalog, PolicyConfig};
use crate::models::{
    AuditStep, GraceAllowance, LeaveRecord, LeaveUsage, LeaveUsageSummary, SilBalance,
    TenureRecord,
};

/// The result of building a usage summary, including the audit step.
#[derive(Debug, Clone)]
pub struct UsageSummaryResult {
    /// The rebuilt summary.
    pub summary: LeaveUsageSummary,
    /// The audit step recording how it was built.
    pub audit_step: AuditStep,
}

/// Returns true if no leave has been filed since the employee was hired.
///
/// Rejected and cancelled requests do not count.
pub fn is_first_leave(history: &[LeaveRecord], tenure: &TenureRecord) -> bool {
    !history
        .iter()
        .any(|r| r.status.counts_toward_usage() && r.start_date >= tenure.hire_date)
}

/// Builds the leave usage summary for the calendar year of `tenure.as_of`.
///
/// Records that are pending, manager-approved, approved or completed and
/// start within the year count; each contributes its paid days (or all of
/// its days when the split is unknown).
///
/// The SIL bucket is present only once the tenure threshold is met. The
/// grace allowance is present only for employees below the threshold, with
/// the grace rule enabled, who have not filed leave before.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::build_usage_summary;
/// use hrms_engine::config::{LeaveTypeCatalog, PolicyConfig};
/// use hrms_engine::models::{LeaveRecord, LeaveStatus, TenureRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let tenure = TenureRecord {
///     hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     as_of: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
///     months: 14,
/// };
/// let history = vec![LeaveRecord {
///     id: "lr_1".to_string(),
///     leave_type: "Sick Leave".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(),
///     days: Decimal::from(6),
///     with_pay_days: None,
///     status: LeaveStatus::Approved,
/// }];
///
/// let result = build_usage_summary(
///     "emp_001", &history, &tenure, &LeaveTypeCatalog::default(), &PolicyConfig::default(), 1,
/// );
/// let sil = result.summary.sil.unwrap();
/// assert_eq!(sil.remaining, Decimal::from(2));
/// ```
pub fn build_usage_summary(
    employee_id: &str,
    history: &[LeaveRecord],
    tenure: &TenureRecord,
    catalog: &LeaveTypeCatalog,
    policy: &PolicyConfig,
    step_number: u32,
) -> UsageSummaryResult {
    let year = tenure.as_of.year();
    let eligible = tenure.meets(policy.tenure.paid_leave_threshold_months);

    let counted: Vec<&LeaveRecord> = history
        .iter()
        .filter(|r| r.status.counts_toward_usage() && r.start_date.year() == year)
        .collect();

    let used_for = |leave_type: &str| -> Decimal {
        counted
            .iter()
            .filter(|r| r.leave_type == leave_type)
            .map(|r| r.paid_days())
            .sum()
    };

    let leave_types: Vec<LeaveUsage> = catalog
        .leave_types()
        .iter()
        .map(|lt| LeaveUsage::new(lt.name.clone(), lt.max_days, used_for(&lt.name)))
        .collect();

    let sil = eligible.then(|| {
        let used: Decimal = counted
            .iter()
            .filter(|r| policy.sil.covers(&r.leave_type))
            .map(|r| r.paid_days())
            .sum();
        SilBalance::new(policy.sil.max_with_pay_days, used)
    });

    let grace = (!eligible && policy.first_year_grace.enabled && is_first_leave(history, tenure))
        .then(|| GraceAllowance {
            max_paid_days: policy.first_year_grace.max_paid_days,
        });

    let reasoning = match (&sil, &grace) {
        (Some(sil), _) => format!(
            "{} records counted for {}; SIL bucket {} of {} days used, {} remaining",
            counted.len(),
            year,
            sil.used_with_pay_days.normalize(),
            sil.max_with_pay_days.normalize(),
            sil.remaining.normalize()
        ),
        (None, Some(grace)) => format!(
            "{} records counted for {}; first leave of employment, {} grace days available",
            counted.len(),
            year,
            grace.max_paid_days.normalize()
        ),
        (None, None) => format!(
            "{} records counted for {}; no SIL bucket below the {}-month threshold",
            counted.len(),
            year,
            policy.tenure.paid_leave_threshold_months
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_usage_summary".to_string(),
        rule_name: "Leave Usage Summary".to_string(),
        input: serde_json::json!({
            "year": year,
            "history_records": history.len(),
            "tenure_months": tenure.months
        }),
        output: serde_json::json!({
            "counted_records": counted.len(),
            "sil_remaining": sil.as_ref().map(|s| s.remaining.normalize().to_string()),
            "grace_days": grace.as_ref().map(|g| g.max_paid_days.normalize().to_string())
        }),
        reasoning,
    };

    UsageSummaryResult {
        summary: LeaveUsageSummary {
            employee_id: employee_id.to_string(),
            year,
            tenure_months: tenure.months,
            eligible_for_paid_leave: eligible,
            leave_types,
            sil,
            grace,
        },
        audit_step,
    }
}
