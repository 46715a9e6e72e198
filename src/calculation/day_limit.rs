//! Per-type day-limit validation.
//!
//! Leave types flagged `allows_excess` accept requests above their
//! entitlement (the excess is unpaid); every other type is capped.

use rust_decimal::Decimal;

use crate::config::LeaveTypeCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning};

/// The result of validating a request against its leave type's limit.
#[derive(Debug, Clone)]
pub struct DayLimitResult {
    /// The entitlement of the leave type.
    pub entitlement: Decimal,
    /// Days beyond the entitlement (always zero for capped types).
    pub excess_days: Decimal,
    /// A warning when the request goes beyond the entitlement.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this validation.
    pub audit_step: AuditStep,
}

/// Validates a requested day count against the leave type's entitlement.
///
/// # Errors
///
/// - `UnknownLeaveType` when the type is not in the catalog.
/// - `DayLimitExceeded` when a capped type is requested beyond its limit.
///
/// # Example
///
/// ```
/// use hrms_engine::calculation::validate_day_limit;
/// use hrms_engine::config::LeaveTypeCatalog;
/// use rust_decimal::Decimal;
///
/// let catalog = LeaveTypeCatalog::default();
///
/// // Vacation leave may exceed its 15 days; the excess is unpaid.
/// let result = validate_day_limit("Vacation Leave", Decimal::from(18), &catalog, 1).unwrap();
/// assert_eq!(result.excess_days, Decimal::from(3));
///
/// // Bereavement leave is capped at 3 days.
/// let err = validate_day_limit("Bereavement Leave", Decimal::from(4), &catalog, 1).unwrap_err();
/// assert!(err.to_string().contains("maximum of 3 days"));
/// ```
pub fn validate_day_limit(
    leave_type: &str,
    requested: Decimal,
    catalog: &LeaveTypeCatalog,
    step_number: u32,
) -> EngineResult<DayLimitResult> {
    let config = catalog.get(leave_type)?;
    let entitlement = config.max_days;

    if requested > entitlement && !config.allows_excess {
        return Err(EngineError::DayLimitExceeded {
            leave_type: leave_type.to_string(),
            requested: requested.normalize(),
            limit: entitlement.normalize(),
        });
    }

    let excess_days = (requested - entitlement).max(Decimal::ZERO);

    let (reasoning, warning) = if excess_days > Decimal::ZERO {
        (
            format!(
                "{} days requested exceeds the {}-day {} entitlement; {} days will be without pay",
                requested.normalize(),
                entitlement.normalize(),
                leave_type,
                excess_days.normalize()
            ),
            Some(AuditWarning {
                code: "EXCEEDS_ENTITLEMENT".to_string(),
                message: format!(
                    "{} days beyond the {} entitlement will be without pay",
                    excess_days.normalize(),
                    leave_type
                ),
                severity: "medium".to_string(),
            }),
        )
    } else {
        (
            format!(
                "{} days requested is within the {}-day {} entitlement",
                requested.normalize(),
                entitlement.normalize(),
                leave_type
            ),
            None,
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_day_limit".to_string(),
        rule_name: "Leave Day Limit".to_string(),
        input: serde_json::json!({
            "leave_type": leave_type,
            "requested_days": requested.normalize().to_string()
        }),
        output: serde_json::json!({
            "entitlement": entitlement.normalize().to_string(),
            "allows_excess": config.allows_excess,
            "excess_days": excess_days.normalize().to_string()
        }),
        reasoning,
    };

    Ok(DayLimitResult {
        entitlement,
        excess_days,
        warning,
        audit_step,
    })
}
