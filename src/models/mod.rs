//! Core data models for the HRMS engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod breakdown;
mod employee;
mod leave;
mod records;

pub use balance::{GraceAllowance, LeaveUsage, LeaveUsageSummary, SilBalance};
pub use breakdown::{
    AuditStep, AuditTrace, AuditWarning, BalanceSource, DayCount, LeavePreview, PaymentBreakdown,
};
pub use employee::{Employee, TenureRecord};
pub use leave::{DurationMode, HalfDayPeriod, LeaveApplication, LeaveRecord, LeaveStatus};
pub use records::{
    AttendanceEditRequest, AttendanceSummary, BenefitClaim, CashAdvance, DisciplinaryNotice,
    EmployeeProfile, MonetizationEligibility, MonetizationRequest, NewAttendanceEdit, NewBenefitClaim,
    NewCashAdvance, NewOvertimeRequest, OvertimeRequest, Payslip, ProfileUpdate, RequestStatus,
};
