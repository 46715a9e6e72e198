//! Configuration types for leave policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A leave type and its yearly entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeConfig {
    /// The leave type name as shown to employees.
    pub name: String,
    /// Maximum entitled days per year.
    pub max_days: Decimal,
    /// Requests beyond `max_days` are accepted, the excess unpaid.
    #[serde(default)]
    pub allows_excess: bool,
}

/// Leave types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Every leave type offered.
    pub leave_types: Vec<LeaveTypeConfig>,
}

/// The leave-type catalog, loaded once and read-only afterwards.
///
/// # Example
///
/// ```
/// use hrms_engine::config::LeaveTypeCatalog;
/// use rust_decimal::Decimal;
///
/// let catalog = LeaveTypeCatalog::default();
/// assert_eq!(catalog.get("Maternity Leave").unwrap().max_days, Decimal::from(105));
/// assert!(catalog.get("Sabbatical").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveTypeCatalog {
    leave_types: Vec<LeaveTypeConfig>,
}

impl LeaveTypeCatalog {
    /// Creates a catalog from its entries, keeping their order.
    pub fn new(leave_types: Vec<LeaveTypeConfig>) -> Self {
        Self { leave_types }
    }

    /// Looks up a leave type by name.
    pub fn get(&self, name: &str) -> EngineResult<&LeaveTypeConfig> {
        self.leave_types
            .iter()
            .find(|lt| lt.name == name)
            .ok_or_else(|| EngineError::UnknownLeaveType {
                name: name.to_string(),
            })
    }

    /// Returns all leave types in configuration order.
    pub fn leave_types(&self) -> &[LeaveTypeConfig] {
        &self.leave_types
    }
}

impl Default for LeaveTypeCatalog {
    fn default() -> Self {
        let entry = |name: &str, max_days: i64, allows_excess: bool| LeaveTypeConfig {
            name: name.to_string(),
            max_days: Decimal::from(max_days),
            allows_excess,
        };
        Self::new(vec![
            entry("Sick Leave", 8, true),
            entry("Emergency Leave", 8, true),
            entry("Vacation Leave", 15, true),
            entry("Maternity Leave", 105, true),
            entry("Paternity Leave", 7, true),
            entry("VAWC Leave", 10, true),
            entry("Parental Leave", 7, true),
            entry("Women's Special Leave", 60, true),
            entry("Bereavement Leave", 3, false),
            entry("Birthday Leave", 1, false),
        ])
    }
}

/// Tenure thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenurePolicy {
    /// Months of service before any leave is paid.
    pub paid_leave_threshold_months: u32,
}

/// Day-count and scheduling rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRules {
    /// Working hours in a leave day.
    pub hours_per_day: Decimal,
    /// Calendar days that must pass after an approved leave ends.
    pub cooldown_days: i64,
}

/// The Service Incentive Leave bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilPolicy {
    /// Paid days shared by the SIL leave types each year.
    pub max_with_pay_days: Decimal,
    /// Leave types drawing from the bucket.
    pub leave_types: Vec<String>,
}

impl SilPolicy {
    /// Returns true if the leave type draws from the SIL bucket.
    pub fn covers(&self, leave_type: &str) -> bool {
        self.leave_types.iter().any(|t| t == leave_type)
    }
}

/// Paid days on the very first leave of a first-year employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GracePolicy {
    /// Whether the grace rule applies at all.
    pub enabled: bool,
    /// Paid days granted.
    pub max_paid_days: Decimal,
}

/// Client-side upload constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Accepted MIME types.
    pub allowed_mime_types: Vec<String>,
    /// Size ceiling for leave and claim attachments.
    pub max_attachment_bytes: u64,
    /// Size ceiling for profile photos and signatures.
    pub max_profile_image_bytes: u64,
}

/// Cash advance limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashAdvancePolicy {
    /// Largest amount a single request may ask for.
    pub max_amount: Decimal,
    /// Most payroll deductions a request may spread over.
    pub max_installments: u32,
}

/// Cache lifetimes per screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Dashboard summary.
    pub dashboard_ttl_secs: u64,
    /// Leave history and balances.
    pub leave_history_ttl_secs: u64,
    /// Employee profile.
    pub profile_ttl_secs: u64,
}

/// Policy configuration from policy.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Tenure thresholds.
    pub tenure: TenurePolicy,
    /// Day-count and scheduling rules.
    pub leave: LeaveRules,
    /// Service Incentive Leave bucket.
    pub sil: SilPolicy,
    /// First-leave grace rule.
    pub first_year_grace: GracePolicy,
    /// Upload constraints.
    pub uploads: UploadPolicy,
    /// Cash advance limits.
    pub cash_advance: CashAdvancePolicy,
    /// Cache lifetimes.
    pub cache: CachePolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tenure: TenurePolicy {
                paid_leave_threshold_months: 12,
            },
            leave: LeaveRules {
                hours_per_day: Decimal::from(8),
                cooldown_days: 7,
            },
            sil: SilPolicy {
                max_with_pay_days: Decimal::from(8),
                leave_types: vec!["Sick Leave".to_string(), "Emergency Leave".to_string()],
            },
            first_year_grace: GracePolicy {
                enabled: false,
                max_paid_days: Decimal::from(7),
            },
            uploads: UploadPolicy {
                allowed_mime_types: ["image/jpeg", "image/png", "image/webp", "application/pdf"]
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
                max_attachment_bytes: 5 * 1024 * 1024,
                max_profile_image_bytes: 2 * 1024 * 1024,
            },
            cash_advance: CashAdvancePolicy {
                max_amount: Decimal::new(5_000_000, 2),
                max_installments: 12,
            },
            cache: CachePolicy {
                dashboard_ttl_secs: 120,
                leave_history_ttl_secs: 300,
                profile_ttl_secs: 600,
            },
        }
    }
}
