//! Endpoint methods, grouped by screen.

use chrono::{NaiveDate, Utc};
use reqwest::Method;
use reqwest::multipart::Form;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::{CacheLookup, Screen, TtlCache};
use crate::forms;
use crate::models::{
    AttendanceEditRequest, AttendanceSummary, BenefitClaim, CashAdvance, DisciplinaryNotice,
    DurationMode, EmployeeProfile, HalfDayPeriod, LeaveApplication, LeaveRecord,
    LeaveUsageSummary, MonetizationEligibility, MonetizationRequest, NewAttendanceEdit,
    NewBenefitClaim, NewCashAdvance, NewOvertimeRequest, OvertimeRequest, Payslip, ProfileUpdate,
};
use crate::report::{EvaluationRecord, ReportFilters, ReportPayload, render_evaluation_report};

use super::{Attachment, ClientResult, HrmsClient, UploadKind};

#[derive(Serialize)]
struct MonetizationBody {
    days: Decimal,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl HrmsClient {
    // Leave

    /// The employee's leave history.
    pub async fn leave_requests(&self) -> ClientResult<Vec<LeaveRecord>> {
        self.get("/leave-requests").await
    }

    /// The leave history, through the cache with the leave history TTL.
    ///
    /// Call [`TtlCache::invalidate`] with [`Screen::LeaveHistory`]'s key after
    /// filing or cancelling a request.
    pub async fn leave_requests_cached(
        &self,
        cache: &TtlCache,
    ) -> ClientResult<CacheLookup<Vec<LeaveRecord>>> {
        self.cached(cache, Screen::LeaveHistory, |client| async move {
            client.leave_requests().await
        })
        .await
    }

    /// Per-type balances for the current year.
    pub async fn leave_balance(&self) -> ClientResult<LeaveUsageSummary> {
        self.get("/leave-requests/balance").await
    }

    /// Files a leave application with an optional supporting document.
    pub async fn submit_leave_request(
        &self,
        application: &LeaveApplication,
        attachment: Option<Attachment>,
    ) -> ClientResult<LeaveRecord> {
        let config = self.config();
        forms::validate_leave_application(
            application,
            attachment.as_ref(),
            config.catalog(),
            &config.policy().uploads,
        )?;

        let mut form = Form::new()
            .text("leave_type", application.leave_type.clone())
            .text("start_date", application.start_date.to_string())
            .text("end_date", application.end_date.to_string())
            .text(
                "duration",
                match application.duration {
                    DurationMode::WholeDay => "whole_day",
                    DurationMode::HalfDay => "half_day",
                },
            );
        if let Some(period) = application.half_day_period {
            form = form.text(
                "half_day_period",
                match period {
                    HalfDayPeriod::Am => "am",
                    HalfDayPeriod::Pm => "pm",
                },
            );
        }
        if let Some(reason) = &application.reason {
            form = form.text("reason", reason.clone());
        }
        if let Some(file) = attachment {
            form = form.part("attachment", file.into_part()?);
        }

        self.send_multipart("/leave-requests", form).await
    }

    /// Withdraws a pending leave request.
    pub async fn cancel_leave_request(&self, id: &str) -> ClientResult<()> {
        self.post_empty(&format!("/leave-requests/{}/cancel", id)).await
    }

    // Cash advances

    /// Cash advances filed by the employee.
    pub async fn cash_advances(&self) -> ClientResult<Vec<CashAdvance>> {
        self.get("/cash-advances").await
    }

    /// Files a cash advance.
    pub async fn submit_cash_advance(&self, request: &NewCashAdvance) -> ClientResult<CashAdvance> {
        forms::validate_cash_advance(request, &self.config().policy().cash_advance)?;
        self.send_json(Method::POST, "/cash-advances", request).await
    }

    // Benefit claims

    /// Benefit claims filed by the employee.
    pub async fn benefit_claims(&self) -> ClientResult<Vec<BenefitClaim>> {
        self.get("/benefit-claims").await
    }

    /// Files a benefit claim with its proof of expense.
    pub async fn submit_benefit_claim(
        &self,
        claim: &NewBenefitClaim,
        proof: Attachment,
    ) -> ClientResult<BenefitClaim> {
        forms::validate_benefit_claim(claim, Some(&proof), &self.config().policy().uploads, today())?;

        let mut form = Form::new()
            .text("claim_type", claim.claim_type.clone())
            .text("amount", claim.amount.to_string())
            .text("incident_date", claim.incident_date.to_string());
        if let Some(description) = &claim.description {
            form = form.text("description", description.clone());
        }
        form = form.part("proof", proof.into_part()?);

        self.send_multipart("/benefit-claims", form).await
    }

    // Attendance

    /// Attendance totals for the current cutoff.
    pub async fn attendance_summary(&self) -> ClientResult<AttendanceSummary> {
        self.get("/attendance/summary").await
    }

    /// Attendance corrections filed by the employee.
    pub async fn attendance_edit_requests(&self) -> ClientResult<Vec<AttendanceEditRequest>> {
        self.get("/attendance/edit-requests").await
    }

    /// Files an attendance correction.
    pub async fn submit_attendance_edit(
        &self,
        edit: &NewAttendanceEdit,
    ) -> ClientResult<AttendanceEditRequest> {
        forms::validate_attendance_edit(edit, today())?;
        self.send_json(Method::POST, "/attendance/edit-requests", edit).await
    }

    /// Files overtime.
    pub async fn submit_overtime(&self, request: &NewOvertimeRequest) -> ClientResult<OvertimeRequest> {
        forms::validate_overtime(request)?;
        self.send_json(Method::POST, "/attendance/overtime", request).await
    }

    // Profile

    /// The employee's profile.
    pub async fn profile(&self) -> ClientResult<EmployeeProfile> {
        self.get("/employee/profile").await
    }

    /// The employee's profile, through the cache with the profile TTL.
    pub async fn profile_cached(&self, cache: &TtlCache) -> ClientResult<CacheLookup<EmployeeProfile>> {
        self.cached(cache, Screen::Profile, |client| async move { client.profile().await })
            .await
    }

    /// Updates contact details.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<EmployeeProfile> {
        forms::validate_profile_update(update, None, &self.config().policy().uploads)?;
        self.send_json(Method::PUT, "/employee/profile", update).await
    }

    /// Replaces the profile photo.
    pub async fn upload_profile_photo(&self, photo: Attachment) -> ClientResult<EmployeeProfile> {
        photo.validate(&self.config().policy().uploads, UploadKind::ProfileImage)?;
        let form = Form::new().part("photo", photo.into_part()?);
        self.send_multipart("/employee/profile/photo", form).await
    }

    /// Replaces the e-signature image.
    pub async fn upload_signature(&self, signature: Attachment) -> ClientResult<EmployeeProfile> {
        forms::validate_profile_update(
            &ProfileUpdate::default(),
            Some(&signature),
            &self.config().policy().uploads,
        )?;
        let form = Form::new().part("signature", signature.into_part()?);
        self.send_multipart("/employee/profile/signature", form).await
    }

    // Payslips

    /// Payslips, newest first as returned by the server.
    pub async fn payslips(&self) -> ClientResult<Vec<Payslip>> {
        self.get("/payslips").await
    }

    /// Downloads a payslip PDF.
    pub async fn download_payslip(&self, id: u64) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("/payslips/{}/download", id)).await
    }

    // Disciplinary notices

    /// Notices issued to the employee.
    pub async fn disciplinary_notices(&self) -> ClientResult<Vec<DisciplinaryNotice>> {
        self.get("/disciplinary/notices").await
    }

    /// Acknowledges receipt of a notice.
    pub async fn acknowledge_notice(&self, id: u64) -> ClientResult<()> {
        self.post_empty(&format!("/disciplinary/notices/{}/acknowledge", id))
            .await
    }

    // Manager evaluations

    /// Evaluations visible to the manager, filtered.
    pub async fn manager_evaluations(
        &self,
        filters: &ReportFilters,
    ) -> ClientResult<Vec<EvaluationRecord>> {
        self.get_with_query("/manager-evaluations", filters).await
    }

    /// The aggregated report payload for the given filters.
    pub async fn evaluation_report(&self, filters: &ReportFilters) -> ClientResult<ReportPayload> {
        self.get_with_query("/manager-evaluations/report", filters)
            .await
    }

    /// Fetches the report payload and renders it for PDF export.
    pub async fn evaluation_report_html(&self, filters: &ReportFilters) -> ClientResult<String> {
        let payload = self.evaluation_report(filters).await?;
        Ok(render_evaluation_report(&payload))
    }

    // Leave monetization

    /// Whether unused leave can be converted now, and at what rate.
    pub async fn monetization_eligibility(&self) -> ClientResult<MonetizationEligibility> {
        self.get("/leave-monetization/eligibility").await
    }

    /// Requests conversion of `days` unused leave days.
    pub async fn request_monetization(&self, days: Decimal) -> ClientResult<MonetizationRequest> {
        forms::validate_monetization(days)?;
        self.send_json(
            Method::POST,
            "/leave-monetization/requests",
            &MonetizationBody { days },
        )
        .await
    }

    // Dashboard

    /// Balance card on the dashboard.
    pub async fn dashboard_leave_balance(&self) -> ClientResult<LeaveUsageSummary> {
        self.get("/dashboard/leave-balance").await
    }

    /// Most recent leave requests on the dashboard.
    pub async fn dashboard_recent_leaves(&self) -> ClientResult<Vec<LeaveRecord>> {
        self.get("/dashboard/recent-leave-requests").await
    }

    /// Attendance card on the dashboard.
    pub async fn dashboard_attendance(&self) -> ClientResult<AttendanceSummary> {
        self.get("/dashboard/attendance-summary").await
    }
}
