//! Leave balance models.
//!
//! [`LeaveUsageSummary`] is rebuilt from the employee's history on every
//! request; nothing in this module is persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entitlement counters for one leave type in one calendar year.
///
/// # Example
///
/// ```
/// use hrms_engine::models::LeaveUsage;
/// use rust_decimal::Decimal;
///
/// let usage = LeaveUsage::new("Vacation Leave", Decimal::from(15), Decimal::from(18));
/// assert_eq!(usage.remaining, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveUsage {
    /// The leave type name.
    pub leave_type: String,
    /// Days entitled for the year.
    pub entitled: Decimal,
    /// Days already used or pending.
    pub used: Decimal,
    /// `max(0, entitled - used)`.
    pub remaining: Decimal,
}

impl LeaveUsage {
    /// Creates usage counters, deriving `remaining`.
    pub fn new(leave_type: impl Into<String>, entitled: Decimal, used: Decimal) -> Self {
        Self {
            leave_type: leave_type.into(),
            entitled,
            used,
            remaining: (entitled - used).max(Decimal::ZERO),
        }
    }
}

/// The Service Incentive Leave bucket shared by Sick and Emergency leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilBalance {
    /// Paid days available per year.
    pub max_with_pay_days: Decimal,
    /// Paid days already consumed; never exceeds the maximum.
    pub used_with_pay_days: Decimal,
    /// Paid days still available.
    pub remaining: Decimal,
}

impl SilBalance {
    /// Creates the bucket, clamping usage to the maximum.
    pub fn new(max_with_pay_days: Decimal, used: Decimal) -> Self {
        let used_with_pay_days = used.max(Decimal::ZERO).min(max_with_pay_days);
        Self {
            max_with_pay_days,
            used_with_pay_days,
            remaining: max_with_pay_days - used_with_pay_days,
        }
    }
}

/// Paid days available to a first-year employee on their first leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraceAllowance {
    /// Paid days granted by the grace rule.
    pub max_paid_days: Decimal,
}

/// Per-type usage for one employee in one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveUsageSummary {
    /// The employee the summary belongs to.
    pub employee_id: String,
    /// The calendar year summarized.
    pub year: i32,
    /// Whole months of service at evaluation time.
    pub tenure_months: u32,
    /// Whether the employee has reached the paid-leave tenure threshold.
    pub eligible_for_paid_leave: bool,
    /// Usage per leave type, in catalog order.
    pub leave_types: Vec<LeaveUsage>,
    /// The shared SIL bucket, present once the tenure threshold is met.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sil: Option<SilBalance>,
    /// First-leave grace allowance, when it applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace: Option<GraceAllowance>,
}

impl LeaveUsageSummary {
    /// Looks up usage for a leave type by name.
    pub fn usage_for(&self, leave_type: &str) -> Option<&LeaveUsage> {
        self.leave_types.iter().find(|u| u.leave_type == leave_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_is_entitled_minus_used() {
        let usage = LeaveUsage::new("Vacation Leave", Decimal::from(15), Decimal::new(45, 1));
        assert_eq!(usage.remaining, Decimal::new(105, 1));
    }

    #[test]
    fn test_remaining_never_negative() {
        let usage = LeaveUsage::new("Vacation Leave", Decimal::from(15), Decimal::from(20));
        assert_eq!(usage.remaining, Decimal::ZERO);
        assert_eq!(usage.used, Decimal::from(20));
    }

    #[test]
    fn test_sil_usage_is_clamped_to_max() {
        let sil = SilBalance::new(Decimal::from(8), Decimal::from(11));
        assert_eq!(sil.used_with_pay_days, Decimal::from(8));
        assert_eq!(sil.remaining, Decimal::ZERO);
    }

    #[test]
    fn test_sil_remaining() {
        let sil = SilBalance::new(Decimal::from(8), Decimal::from(6));
        assert_eq!(sil.remaining, Decimal::from(2));
    }

    #[test]
    fn test_summary_skips_absent_buckets() {
        let summary = LeaveUsageSummary {
            employee_id: "emp_001".to_string(),
            year: 2026,
            tenure_months: 5,
            eligible_for_paid_leave: false,
            leave_types: vec![],
            sil: None,
            grace: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("sil"));
        assert!(!json.contains("grace"));
    }
}
