//! Paid/unpaid split of a leave request.
//!
//! Decides how many requested days are covered by the employee's remaining
//! paid balance. The function is pure: balances come in through the usage
//! summary and nothing is written back.

use rust_decimal::Decimal;

use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, BalanceSource, LeaveUsageSummary, PaymentBreakdown, TenureRecord,
};

/// The result of a payment breakdown, including the audit step.
#[derive(Debug, Clone)]
pub struct PaymentBreakdownResult {
    /// The paid/unpaid split.
    pub breakdown: PaymentBreakdown,
    /// A warning when any day is unpaid.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn day_phrase(days: Decimal) -> String {
    if days == Decimal::ONE {
        "1 day".to_string()
    } else {
        format!("{} days", days.normalize())
    }
}

fn verb(days: Decimal) -> &'static str {
    if days == Decimal::ONE { "is" } else { "are" }
}

/// Splits `requested` days into paid and unpaid against `remaining`.
fn split(requested: Decimal, remaining: Decimal) -> (Decimal, Decimal) {
    let remaining = remaining.max(Decimal::ZERO);
    if remaining >= requested {
        (requested, Decimal::ZERO)
    } else {
        (remaining, requested - remaining)
    }
}

fn describe(requested: Decimal, with_pay: Decimal, without_pay: Decimal, label: &str) -> String {
    if without_pay == Decimal::ZERO {
        format!(
            "All {} {} with pay from your {} balance.",
            day_phrase(requested),
            verb(requested),
            label
        )
    } else if with_pay > Decimal::ZERO {
        format!(
            "Only {} {} with pay. The remaining {} will be without pay because your {} balance has {} left.",
            day_phrase(with_pay),
            verb(with_pay),
            day_phrase(without_pay),
            label,
            day_phrase(with_pay)
        )
    } else {
        format!(
            "Your {} balance is used up. All {} will be without pay.",
            label,
            day_phrase(requested)
        )
    }
}

/// Computes the paid/unpaid split of a leave request.
///
/// 1. Below the tenure threshold every day is unpaid, unless the summary
///    carries a first-leave grace allowance, which is then the balance.
/// 2. Sick and Emergency leave for tenured employees read the shared SIL
///    bucket; every other type reads its own entitlement.
/// 3. Remaining covers the request: all paid. Remaining covers part of it:
///    split. Nothing remaining: all unpaid.
///
/// # Errors
///
/// Returns `UnknownLeaveType` when the summary has no counters for the type,
/// and `CalculationError` when a tenured summary has no SIL bucket.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::calculate_payment_breakdown;
/// use hrms_engine::config::PolicyConfig;
/// use hrms_engine::models::{LeaveUsageSummary, SilBalance, TenureRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let tenure = TenureRecord {
///     hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     as_of: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
///     months: 14,
/// };
/// let usage = LeaveUsageSummary {
///     employee_id: "emp_001".to_string(),
///     year: 2026,
///     tenure_months: 14,
///     eligible_for_paid_leave: true,
///     leave_types: vec![],
///     sil: Some(SilBalance::new(Decimal::from(8), Decimal::from(6))),
///     grace: None,
/// };
///
/// let result = calculate_payment_breakdown(
///     "Sick Leave", Decimal::from(5), &tenure, &usage, &PolicyConfig::default(), 1,
/// ).unwrap();
/// assert_eq!(result.breakdown.with_pay_days, Decimal::from(2));
/// assert_eq!(result.breakdown.without_pay_days, Decimal::from(3));
/// assert!(result.breakdown.is_split);
/// assert!(result.breakdown.message.starts_with("Only 2 days are with pay"));
/// ```
pub fn calculate_payment_breakdown(
    leave_type: &str,
    requested: Decimal,
    tenure: &TenureRecord,
    usage: &LeaveUsageSummary,
    policy: &PolicyConfig,
    step_number: u32,
) -> EngineResult<PaymentBreakdownResult> {
    let threshold = policy.tenure.paid_leave_threshold_months;
    let eligible = tenure.meets(threshold);

    let (source, remaining, label) = if !eligible {
        match &usage.grace {
            Some(grace) => (
                BalanceSource::Grace,
                grace.max_paid_days,
                "first-leave grace".to_string(),
            ),
            None => (BalanceSource::Ineligible, Decimal::ZERO, String::new()),
        }
    } else if policy.sil.covers(leave_type) {
        let sil = usage.sil.as_ref().ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "usage summary for {} has no SIL bucket despite {} months of service",
                usage.employee_id, tenure.months
            ),
        })?;
        (
            BalanceSource::Sil,
            sil.remaining,
            "Service Incentive Leave".to_string(),
        )
    } else {
        let counters = usage
            .usage_for(leave_type)
            .ok_or_else(|| EngineError::UnknownLeaveType {
                name: leave_type.to_string(),
            })?;
        (
            BalanceSource::LeaveType,
            counters.remaining,
            leave_type.to_string(),
        )
    };

    let (with_pay_days, without_pay_days) = split(requested, remaining);
    let is_split = with_pay_days > Decimal::ZERO && without_pay_days > Decimal::ZERO;

    let message = match source {
        BalanceSource::Ineligible => format!(
            "Employees with less than {} months of service are not eligible for paid leave. All {} will be without pay.",
            threshold,
            day_phrase(requested)
        ),
        _ => describe(requested, with_pay_days, without_pay_days, &label),
    };

    let warning = (without_pay_days > Decimal::ZERO).then(|| AuditWarning {
        code: "UNPAID_DAYS".to_string(),
        message: format!("{} of this request will be without pay", day_phrase(without_pay_days)),
        severity: if with_pay_days > Decimal::ZERO {
            "medium".to_string()
        } else {
            "high".to_string()
        },
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "payment_breakdown".to_string(),
        rule_name: "Payment Breakdown".to_string(),
        input: serde_json::json!({
            "leave_type": leave_type,
            "requested_days": requested.normalize().to_string(),
            "tenure_months": tenure.months,
            "source": source,
            "remaining": remaining.normalize().to_string()
        }),
        output: serde_json::json!({
            "with_pay_days": with_pay_days.normalize().to_string(),
            "without_pay_days": without_pay_days.normalize().to_string(),
            "is_split": is_split
        }),
        reasoning: message.clone(),
    };

    Ok(PaymentBreakdownResult {
        breakdown: PaymentBreakdown {
            requested_days: requested,
            with_pay_days,
            without_pay_days,
            is_split,
            source,
            message,
        },
        warning,
        audit_step,
    })
}
