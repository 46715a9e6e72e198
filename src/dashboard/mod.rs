//! Dashboard aggregation.
//!
//! The dashboard fires its six sub-requests together and settles each one
//! on its own. A failed section falls back to its empty default and is
//! listed in [`DashboardSummary::degraded`]; loading the dashboard never fails.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheLookup, Screen, TtlCache};
use crate::client::{ClientResult, HrmsClient};
use crate::models::{
    AttendanceSummary, BenefitClaim, CashAdvance, DisciplinaryNotice, LeaveRecord,
    LeaveUsageSummary,
};

/// One card on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    /// Leave balance card.
    LeaveBalance,
    /// Recent leave requests list.
    RecentLeaveRequests,
    /// Cash advance list.
    CashAdvances,
    /// Benefit claim list.
    BenefitClaims,
    /// Attendance card.
    Attendance,
    /// Disciplinary notices list.
    DisciplinaryNotices,
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardSection::LeaveBalance => "leave_balance",
            DashboardSection::RecentLeaveRequests => "recent_leave_requests",
            DashboardSection::CashAdvances => "cash_advances",
            DashboardSection::BenefitClaims => "benefit_claims",
            DashboardSection::Attendance => "attendance",
            DashboardSection::DisciplinaryNotices => "disciplinary_notices",
        };
        f.write_str(name)
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Balances; `None` when the section failed.
    pub leave_balance: Option<LeaveUsageSummary>,
    /// Latest leave requests.
    pub recent_leave_requests: Vec<LeaveRecord>,
    /// Cash advances.
    pub cash_advances: Vec<CashAdvance>,
    /// Benefit claims.
    pub benefit_claims: Vec<BenefitClaim>,
    /// Attendance totals.
    pub attendance: AttendanceSummary,
    /// Disciplinary notices.
    pub disciplinary_notices: Vec<DisciplinaryNotice>,
    /// Sections that fell back to defaults.
    pub degraded: Vec<DashboardSection>,
}

impl DashboardSummary {
    /// Returns true when every section loaded.
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }

    /// Notices the employee has not acknowledged yet.
    pub fn pending_acknowledgements(&self) -> usize {
        self.disciplinary_notices
            .iter()
            .filter(|n| !n.acknowledged)
            .count()
    }
}

fn settle<T: Default>(
    section: DashboardSection,
    result: ClientResult<T>,
    degraded: &mut Vec<DashboardSection>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(%section, error = %e, "Dashboard section degraded");
            degraded.push(section);
            T::default()
        }
    }
}

/// Loads every dashboard section in parallel.
pub async fn load_dashboard(client: &HrmsClient) -> DashboardSummary {
    let (balance, recent, advances, claims, attendance, notices) = futures::join!(
        client.dashboard_leave_balance(),
        client.dashboard_recent_leaves(),
        client.cash_advances(),
        client.benefit_claims(),
        client.dashboard_attendance(),
        client.disciplinary_notices(),
    );

    let mut degraded = Vec::new();
    let summary = DashboardSummary {
        leave_balance: settle(
            DashboardSection::LeaveBalance,
            balance.map(Some),
            &mut degraded,
        ),
        recent_leave_requests: settle(
            DashboardSection::RecentLeaveRequests,
            recent,
            &mut degraded,
        ),
        cash_advances: settle(DashboardSection::CashAdvances, advances, &mut degraded),
        benefit_claims: settle(DashboardSection::BenefitClaims, claims, &mut degraded),
        attendance: settle(DashboardSection::Attendance, attendance, &mut degraded),
        disciplinary_notices: settle(
            DashboardSection::DisciplinaryNotices,
            notices,
            &mut degraded,
        ),
        degraded,
    };

    info!(
        degraded_sections = summary.degraded.len(),
        "Dashboard loaded"
    );
    summary
}

/// A refresh in which at least one section failed.
///
/// Carries the partial summary so a caller with nothing cached can still
/// show it; it is never written to the cache.
#[derive(Debug, Error)]
#[error("{} dashboard section(s) degraded", .0.degraded.len())]
struct DegradedDashboard(DashboardSummary);

/// Loads the dashboard through the cache.
///
/// A stale summary is returned at once and refreshed in the background.
/// Only complete summaries are cached: a degraded load on a miss is returned
/// uncached, and a degraded background refresh leaves the stale entry alone.
pub async fn load_dashboard_cached(
    client: &HrmsClient,
    cache: &TtlCache,
) -> CacheLookup<DashboardSummary> {
    let ttl = Screen::Dashboard.ttl(&client.config().policy().cache);
    let client = client.clone();

    let lookup = cache
        .read_through(Screen::Dashboard.key(), ttl, move || async move {
            let summary = load_dashboard(&client).await;
            if summary.is_complete() {
                Ok(summary)
            } else {
                Err(DegradedDashboard(summary))
            }
        })
        .await;

    match lookup {
        Ok(lookup) => lookup,
        Err(DegradedDashboard(summary)) => CacheLookup {
            value: summary,
            is_stale: false,
            stored_at: Utc::now(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;

    #[test]
    fn test_settle_falls_back_to_default() {
        let mut degraded = Vec::new();
        let notices: Vec<DisciplinaryNotice> = settle(
            DashboardSection::DisciplinaryNotices,
            Err(ClientError::Http {
                status: 500,
                message: "Server error".to_string(),
            }),
            &mut degraded,
        );
        assert!(notices.is_empty());
        assert_eq!(degraded, vec![DashboardSection::DisciplinaryNotices]);

        let attendance = settle(
            DashboardSection::Attendance,
            Ok(AttendanceSummary {
                days_present: 9,
                ..Default::default()
            }),
            &mut degraded,
        );
        assert_eq!(attendance.days_present, 9);
        assert_eq!(degraded.len(), 1);
    }

    #[test]
    fn test_section_names() {
        assert_eq!(DashboardSection::RecentLeaveRequests.to_string(), "recent_leave_requests");
        let json = serde_json::to_string(&DashboardSection::LeaveBalance).unwrap();
        assert_eq!(json, "\"leave_balance\"");
    }
}
