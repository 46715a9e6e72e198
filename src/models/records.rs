//! Employee self-service records.
//!
//! Records exchanged with the HR REST API: cash advances, benefit claims,
//! attendance edits, overtime, payslips, disciplinary notices, profiles and
//! leave monetization.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Approval status shared by the self-service request types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting review.
    Pending,
    /// Approved by the manager, awaiting HR.
    ManagerApproved,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
    /// Paid out or otherwise closed.
    Completed,
    /// Withdrawn.
    Cancelled,
}

/// A cash advance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashAdvance {
    /// Server identifier.
    pub id: u64,
    /// Requested amount.
    pub amount: Decimal,
    /// Why the advance is needed.
    pub reason: String,
    /// Number of payroll deductions.
    pub installments: u32,
    /// Current status.
    pub status: RequestStatus,
    /// When the request was filed.
    pub requested_at: DateTime<Utc>,
}

/// Payload to file a cash advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCashAdvance {
    /// Requested amount.
    pub amount: Decimal,
    /// Why the advance is needed.
    pub reason: String,
    /// Number of payroll deductions.
    pub installments: u32,
}

/// A benefit claim (medical, rice subsidy, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitClaim {
    /// Server identifier.
    pub id: u64,
    /// Benefit type name.
    pub claim_type: String,
    /// Claimed amount.
    pub amount: Decimal,
    /// When the expense was incurred.
    pub incident_date: NaiveDate,
    /// Current status.
    pub status: RequestStatus,
    /// URL of the uploaded proof.
    #[serde(default)]
    pub proof_url: Option<String>,
}

/// Payload to file a benefit claim; the proof travels as a multipart part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBenefitClaim {
    /// Benefit type name.
    pub claim_type: String,
    /// Claimed amount.
    pub amount: Decimal,
    /// When the expense was incurred.
    pub incident_date: NaiveDate,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A request to correct a day's attendance log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEditRequest {
    /// Server identifier.
    pub id: u64,
    /// The day being corrected.
    pub date: NaiveDate,
    /// Corrected time in.
    pub time_in: NaiveTime,
    /// Corrected time out.
    pub time_out: NaiveTime,
    /// Why the log is wrong.
    pub reason: String,
    /// Current status.
    pub status: RequestStatus,
}

/// Payload to file an attendance edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendanceEdit {
    /// The day being corrected.
    pub date: NaiveDate,
    /// Corrected time in.
    pub time_in: NaiveTime,
    /// Corrected time out.
    pub time_out: NaiveTime,
    /// Why the log is wrong.
    pub reason: String,
}

/// Attendance totals for the current cutoff.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days present.
    pub days_present: u32,
    /// Days absent.
    pub days_absent: u32,
    /// Late arrivals.
    pub late_count: u32,
    /// Total late minutes.
    pub late_minutes: u32,
}

/// Payload to file overtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOvertimeRequest {
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// Overtime hours.
    pub hours: Decimal,
    /// What the overtime was for.
    pub reason: String,
}

/// A filed overtime request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Server identifier.
    pub id: u64,
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// Overtime hours.
    pub hours: Decimal,
    /// What the overtime was for.
    pub reason: String,
    /// Current status.
    pub status: RequestStatus,
}

/// A payslip for one payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Server identifier.
    pub id: u64,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}

/// A disciplinary notice issued to the employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplinaryNotice {
    /// Server identifier.
    pub id: u64,
    /// The offense cited.
    pub violation: String,
    /// Sanction applied.
    pub sanction: String,
    /// When the notice was issued.
    pub issued_on: NaiveDate,
    /// Whether the employee has acknowledged it.
    #[serde(default)]
    pub acknowledged: bool,
}

/// The employee's own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Home address.
    #[serde(default)]
    pub address: Option<String>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Hire date.
    pub hire_date: NaiveDate,
}

/// Editable profile fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Leave days eligible for conversion to cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetizationEligibility {
    /// Unused convertible days.
    pub convertible_days: Decimal,
    /// Daily rate applied to converted days.
    pub daily_rate: Decimal,
    /// Whether a request may be filed now.
    pub can_request: bool,
}

/// A request to convert unused leave days to cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetizationRequest {
    /// Server identifier.
    pub id: u64,
    /// Days converted.
    pub days: Decimal,
    /// Cash value of the converted days.
    pub amount: Decimal,
    /// Current status.
    pub status: RequestStatus,
}
