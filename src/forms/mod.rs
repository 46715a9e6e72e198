//! Client-side form validation.
//!
//! Every self-service form is checked here before any network call.
//! Failures come back as [`ValidationErrors`], keyed by field.

mod errors;
mod leave;
mod profile;
mod requests;

pub use errors::ValidationErrors;
pub use leave::validate_leave_application;
pub use profile::{is_valid_email, is_valid_phone, validate_profile_update};
pub use requests::{
    MAX_OVERTIME_HOURS, validate_attendance_edit, validate_benefit_claim, validate_cash_advance,
    validate_monetization, validate_overtime,
};
