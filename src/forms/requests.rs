//! Self-service request form checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::client::{Attachment, UploadKind};
use crate::config::{CashAdvancePolicy, UploadPolicy};
use crate::models::{NewAttendanceEdit, NewBenefitClaim, NewCashAdvance, NewOvertimeRequest};

use super::errors::{ValidationErrors, present};

/// Longest overtime that may be filed for one day.
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Checks a cash advance request.
///
/// The amount must be positive and within the policy ceiling, and the
/// installments between one and the policy maximum.
pub fn validate_cash_advance(
    request: &NewCashAdvance,
    policy: &CashAdvancePolicy,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if request.amount <= Decimal::ZERO {
        errors.add("amount", "Amount must be greater than zero");
    } else if request.amount > policy.max_amount {
        errors.add(
            "amount",
            format!("Amount cannot exceed {}", policy.max_amount.normalize()),
        );
    }

    errors.require(
        present(Some(&request.reason)),
        "reason",
        "Please provide a reason for the cash advance",
    );

    if request.installments < 1 || request.installments > policy.max_installments {
        errors.add(
            "installments",
            format!(
                "Repayment must be between 1 and {} installments",
                policy.max_installments
            ),
        );
    }

    errors.into_result()
}

/// Checks a benefit claim and its proof attachment.
pub fn validate_benefit_claim(
    claim: &NewBenefitClaim,
    proof: Option<&Attachment>,
    uploads: &UploadPolicy,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.require(
        present(Some(&claim.claim_type)),
        "claim_type",
        "Please select a benefit type",
    );
    errors.require(
        claim.amount > Decimal::ZERO,
        "amount",
        "Amount must be greater than zero",
    );
    errors.require(
        claim.incident_date <= today,
        "incident_date",
        "Incident date cannot be in the future",
    );

    match proof {
        None => errors.add("proof", "Please attach proof for this claim"),
        Some(file) => {
            if let Err(err) = file.validate(uploads, UploadKind::Attachment) {
                errors.add("proof", err.user_message());
            }
        }
    }

    errors.into_result()
}

/// Checks an attendance correction.
pub fn validate_attendance_edit(
    edit: &NewAttendanceEdit,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.require(
        edit.date <= today,
        "date",
        "Cannot request an edit for a future date",
    );
    errors.require(
        edit.time_out > edit.time_in,
        "time_out",
        "Time out must be after time in",
    );
    errors.require(
        present(Some(&edit.reason)),
        "reason",
        "Please explain why the record needs correcting",
    );

    errors.into_result()
}

/// Checks an overtime filing. Hours must be in `(0, 12]`.
///
/// # Example
///
/// ```
/// use hrms_engine::forms::validate_overtime;
/// use hrms_engine::models::NewOvertimeRequest;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = NewOvertimeRequest {
///     date: NaiveDate::from_ymd_opt(2026, 3, 19).unwrap(),
///     hours: Decimal::new(125, 1),
///     reason: "Month-end close".to_string(),
/// };
/// let errors = validate_overtime(&request).unwrap_err();
/// assert!(errors.has("hours"));
/// ```
pub fn validate_overtime(request: &NewOvertimeRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if request.hours <= Decimal::ZERO || request.hours > MAX_OVERTIME_HOURS {
        errors.add(
            "hours",
            format!(
                "Overtime hours must be more than 0 and at most {}",
                MAX_OVERTIME_HOURS
            ),
        );
    }
    errors.require(
        present(Some(&request.reason)),
        "reason",
        "Please describe the overtime work",
    );

    errors.into_result()
}

/// Checks a leave monetization request.
///
/// Days must be positive and in half-day steps.
pub fn validate_monetization(days: Decimal) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if days <= Decimal::ZERO {
        errors.add("days", "Days to convert must be greater than zero");
    } else if (days * Decimal::TWO).fract() != Decimal::ZERO {
        errors.add("days", "Days to convert must be in half-day steps");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_cash_advance_bounds() {
        let policy = PolicyConfig::default().cash_advance;
        let mut request = NewCashAdvance {
            amount: dec("5000.00"),
            reason: "Tuition".to_string(),
            installments: 4,
        };
        assert!(validate_cash_advance(&request, &policy).is_ok());

        request.amount = Decimal::ZERO;
        assert!(validate_cash_advance(&request, &policy).unwrap_err().has("amount"));

        request.amount = dec("50000.01");
        let errors = validate_cash_advance(&request, &policy).unwrap_err();
        assert_eq!(errors.get("amount"), ["Amount cannot exceed 50000".to_string()]);

        request.amount = dec("50000.00");
        assert!(validate_cash_advance(&request, &policy).is_ok());
    }

    #[test]
    fn test_cash_advance_installments() {
        let policy = PolicyConfig::default().cash_advance;
        for (installments, ok) in [(0, false), (1, true), (12, true), (13, false)] {
            let request = NewCashAdvance {
                amount: dec("1000"),
                reason: "Repairs".to_string(),
                installments,
            };
            assert_eq!(validate_cash_advance(&request, &policy).is_ok(), ok, "{}", installments);
        }
    }

    #[test]
    fn test_benefit_claim_requires_proof_and_past_date() {
        let uploads = PolicyConfig::default().uploads;
        let claim = NewBenefitClaim {
            claim_type: "Medical".to_string(),
            amount: dec("1500"),
            incident_date: date(2026, 3, 21),
            description: None,
        };

        let errors = validate_benefit_claim(&claim, None, &uploads, date(2026, 3, 20)).unwrap_err();
        assert!(errors.has("proof"));
        assert!(errors.has("incident_date"));

        let receipt = Attachment::new("receipt.jpg", "image/jpeg", vec![0; 100]);
        assert!(validate_benefit_claim(&claim, Some(&receipt), &uploads, date(2026, 3, 21)).is_ok());
    }

    #[test]
    fn test_benefit_claim_amount_and_type() {
        let uploads = PolicyConfig::default().uploads;
        let claim = NewBenefitClaim {
            claim_type: String::new(),
            amount: Decimal::ZERO,
            incident_date: date(2026, 3, 1),
            description: None,
        };
        let receipt = Attachment::new("receipt.pdf", "application/pdf", vec![0; 100]);
        let errors =
            validate_benefit_claim(&claim, Some(&receipt), &uploads, date(2026, 3, 20)).unwrap_err();
        assert!(errors.has("claim_type"));
        assert!(errors.has("amount"));
    }

    #[test]
    fn test_attendance_edit() {
        let mut edit = NewAttendanceEdit {
            date: date(2026, 3, 19),
            time_in: time(8, 0),
            time_out: time(17, 0),
            reason: "Biometric failure".to_string(),
        };
        assert!(validate_attendance_edit(&edit, date(2026, 3, 20)).is_ok());

        edit.time_out = time(8, 0);
        edit.date = date(2026, 3, 21);
        let errors = validate_attendance_edit(&edit, date(2026, 3, 20)).unwrap_err();
        assert!(errors.has("time_out"));
        assert!(errors.has("date"));
    }

    #[test]
    fn test_overtime_hours_range() {
        for (hours, ok) in [("0", false), ("0.5", true), ("12", true), ("12.01", false), ("-1", false)] {
            let request = NewOvertimeRequest {
                date: date(2026, 3, 19),
                hours: dec(hours),
                reason: "Inventory".to_string(),
            };
            assert_eq!(validate_overtime(&request).is_ok(), ok, "{}", hours);
        }
    }

    #[test]
    fn test_monetization_days() {
        assert!(validate_monetization(dec("3")).is_ok());
        assert!(validate_monetization(dec("2.5")).is_ok());

        let zero = validate_monetization(Decimal::ZERO).unwrap_err();
        assert_eq!(zero.get("days")[0], "Days to convert must be greater than zero");
        assert!(validate_monetization(dec("-1")).is_err());
        assert!(validate_monetization(dec("1.25")).unwrap_err().has("days"));
    }
}
