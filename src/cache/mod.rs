//! Client-side response cache.
//!
//! A single [`TtlCache`] serves every screen; only the TTL differs, taken
//! from the policy's cache section via [`Screen::ttl`].

mod store;
mod ttl;

use std::time::Duration;

use crate::config::CachePolicy;

pub use store::{CacheEntry, CacheStore, JsonFileStore, MemoryStore};
pub use ttl::{CacheLookup, Clock, SystemClock, TtlCache};

/// Screens whose data is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Dashboard summary.
    Dashboard,
    /// Leave history and balances.
    LeaveHistory,
    /// Employee profile.
    Profile,
}

impl Screen {
    /// Cache key for the screen's data.
    pub fn key(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard_summary",
            Screen::LeaveHistory => "leave_history",
            Screen::Profile => "employee_profile",
        }
    }

    /// How long the screen's data stays fresh.
    pub fn ttl(&self, policy: &CachePolicy) -> Duration {
        let secs = match self {
            Screen::Dashboard => policy.dashboard_ttl_secs,
            Screen::LeaveHistory => policy.leave_history_ttl_secs,
            Screen::Profile => policy.profile_ttl_secs,
        };
        Duration::from_secs(secs)
    }
}
