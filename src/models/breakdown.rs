//! Day-count and payment-breakdown results.
//!
//! These are the outputs of the leave calculation pipeline, along with the
//! audit trace that records how each one was reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DurationMode, HalfDayPeriod, LeaveUsageSummary, TenureRecord};

/// Days and hours covered by a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    /// Leave days, in half-day steps.
    pub days: Decimal,
    /// `days * hours_per_day`.
    pub hours: Decimal,
    /// The duration mode the count was computed with.
    pub duration: DurationMode,
    /// The half-day period, for half-day requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_day_period: Option<HalfDayPeriod>,
}

/// Which balance a payment breakdown was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSource {
    /// The shared Service Incentive Leave bucket.
    Sil,
    /// The per-type entitlement.
    LeaveType,
    /// The first-leave grace allowance.
    Grace,
    /// No paid balance; tenure below threshold.
    Ineligible,
}

/// Paid/unpaid split for a single pending leave request.
///
/// Shown to the employee before submission; never persisted.
///
/// # Example
///
/// ```
/// use hrms_engine::models::{BalanceSource, PaymentBreakdown};
/// use rust_decimal::Decimal;
///
/// let breakdown = PaymentBreakdown {
///     requested_days: Decimal::from(5),
///     with_pay_days: Decimal::from(2),
///     without_pay_days: Decimal::from(3),
///     is_split: true,
///     source: BalanceSource::Sil,
///     message: "Only 2 days are with pay.".to_string(),
/// };
/// assert_eq!(breakdown.with_pay_days + breakdown.without_pay_days, breakdown.requested_days);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Total days requested.
    pub requested_days: Decimal,
    /// Days covered by remaining paid balance.
    pub with_pay_days: Decimal,
    /// Days beyond the paid balance.
    pub without_pay_days: Decimal,
    /// True when the request is partly paid and partly unpaid.
    pub is_split: bool,
    /// The balance the paid days come from.
    pub source: BalanceSource,
    /// Human-readable explanation of the split.
    pub message: String,
}

/// A single step in the audit trace recording a policy decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings flag outcomes the employee should see but that do not
/// block the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Ordered steps.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
    /// Evaluation time in microseconds.
    pub duration_us: u64,
}

/// Full result of previewing a leave request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePreview {
    /// Unique identifier for this evaluation.
    pub preview_id: Uuid,
    /// When the evaluation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the preview.
    pub engine_version: String,
    /// The employee evaluated.
    pub employee_id: String,
    /// The leave type requested.
    pub leave_type: String,
    /// Day count of the request.
    pub day_count: DayCount,
    /// Tenure at evaluation time.
    pub tenure: TenureRecord,
    /// Balances before the request.
    pub usage: LeaveUsageSummary,
    /// Paid/unpaid split of the request.
    pub breakdown: PaymentBreakdown,
    /// How the result was reached.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_source_serialization() {
        assert_eq!(
            serde_json::to_string(&BalanceSource::LeaveType).unwrap(),
            "\"leave_type\""
        );
        assert_eq!(serde_json::to_string(&BalanceSource::Sil).unwrap(), "\"sil\"");
    }

    #[test]
    fn test_day_count_serializes_decimals_as_strings() {
        let count = DayCount {
            days: Decimal::new(5, 1),
            hours: Decimal::from(4),
            duration: DurationMode::HalfDay,
            half_day_period: Some(HalfDayPeriod::Am),
        };
        let json = serde_json::to_value(&count).unwrap();
        assert_eq!(json["days"], "0.5");
        assert_eq!(json["half_day_period"], "am");
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
