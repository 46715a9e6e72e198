//! Leave application form checks.

use crate::client::{Attachment, UploadKind};
use crate::config::{LeaveTypeCatalog, UploadPolicy};
use crate::models::{DurationMode, LeaveApplication};

use super::errors::{ValidationErrors, present};

/// Checks a leave application before it is submitted.
///
/// # Example
///
/// ```
/// use hrms_engine::config::{LeaveTypeCatalog, PolicyConfig};
/// use hrms_engine::forms::validate_leave_application;
/// use hrms_engine::models::{DurationMode, LeaveApplication};
/// use chrono::NaiveDate;
///
/// let application = LeaveApplication {
///     leave_type: "Vacation Leave".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 4, 8).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
///     duration: DurationMode::WholeDay,
///     half_day_period: None,
///     reason: Some("Trip".to_string()),
/// };
/// let errors = validate_leave_application(
///     &application,
///     None,
///     &LeaveTypeCatalog::default(),
///     &PolicyConfig::default().uploads,
/// )
/// .unwrap_err();
/// assert!(errors.has("end_date"));
/// ```
pub fn validate_leave_application(
    application: &LeaveApplication,
    attachment: Option<&Attachment>,
    catalog: &LeaveTypeCatalog,
    uploads: &UploadPolicy,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if application.leave_type.trim().is_empty() {
        errors.add("leave_type", "Please select a leave type");
    } else if catalog.get(&application.leave_type).is_err() {
        errors.add(
            "leave_type",
            format!("{} is not a recognized leave type", application.leave_type),
        );
    }

    if application.end_date < application.start_date {
        errors.add("end_date", "End date cannot be before the start date");
    }

    if application.duration == DurationMode::HalfDay {
        errors.require(
            application.half_day_period.is_some(),
            "half_day_period",
            "Please choose AM or PM for a half-day leave",
        );
        errors.require(
            application.start_date == application.end_date,
            "end_date",
            "A half-day leave must start and end on the same day",
        );
    }

    errors.require(
        present(application.reason.as_deref()),
        "reason",
        "Please provide a reason for your leave",
    );

    if let Some(file) = attachment {
        if let Err(err) = file.validate(uploads, UploadKind::Attachment) {
            errors.add("attachment", err.user_message());
        }
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::models::HalfDayPeriod;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn application() -> LeaveApplication {
        LeaveApplication {
            leave_type: "Sick Leave".to_string(),
            start_date: date(2026, 3, 23),
            end_date: date(2026, 3, 24),
            duration: DurationMode::WholeDay,
            half_day_period: None,
            reason: Some("Flu".to_string()),
        }
    }

    fn check(app: &LeaveApplication, attachment: Option<&Attachment>) -> Result<(), ValidationErrors> {
        validate_leave_application(
            app,
            attachment,
            &LeaveTypeCatalog::default(),
            &PolicyConfig::default().uploads,
        )
    }

    #[test]
    fn test_valid_application() {
        assert!(check(&application(), None).is_ok());
    }

    #[test]
    fn test_missing_type_and_reason() {
        let mut app = application();
        app.leave_type = " ".to_string();
        app.reason = None;

        let errors = check(&app, None).unwrap_err();
        assert!(errors.has("leave_type"));
        assert!(errors.has("reason"));
    }

    #[test]
    fn test_unknown_type() {
        let mut app = application();
        app.leave_type = "Sabbatical".to_string();
        let errors = check(&app, None).unwrap_err();
        assert_eq!(errors.get("leave_type"), ["Sabbatical is not a recognized leave type".to_string()]);
    }

    #[test]
    fn test_half_day_needs_period_and_single_day() {
        let mut app = application();
        app.duration = DurationMode::HalfDay;

        let errors = check(&app, None).unwrap_err();
        assert!(errors.has("half_day_period"));
        assert!(errors.has("end_date"));

        app.end_date = app.start_date;
        app.half_day_period = Some(HalfDayPeriod::Am);
        assert!(check(&app, None).is_ok());
    }

    #[test]
    fn test_attachment_is_checked() {
        let file = Attachment::new("cert.gif", "image/gif", vec![0; 8]);
        let errors = check(&application(), Some(&file)).unwrap_err();
        assert!(errors.has("attachment"));
    }
}
