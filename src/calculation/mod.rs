//! Leave policy calculations.
//!
//! This module contains the pure functions that evaluate a leave request:
//! tenure classification, day counting, per-type day limits, overlap and
//! cooldown checks, usage summaries and the paid/unpaid payment breakdown.
//! Each rule returns an audit step alongside its result.

mod day_count;
mod day_limit;
mod overlap;
mod payment_breakdown;
mod preview;
mod tenure;
mod usage_summary;

pub use day_count::{DEFAULT_HOURS_PER_DAY, DayCountResult, HALF_DAY, count_leave_days};
pub use day_limit::{DayLimitResult, validate_day_limit};
pub use overlap::{
    DEFAULT_COOLDOWN_DAYS, ScheduleCheck, check_cooldown, check_overlap, cooldown_eligible_date,
    validate_schedule,
};
pub use payment_breakdown::{PaymentBreakdownResult, calculate_payment_breakdown};
pub use preview::{preview_leave_request, summarize_balances};
pub use tenure::{TenureResult, classify_tenure, months_of_service};
pub use usage_summary::{UsageSummaryResult, build_usage_summary, is_first_leave};
