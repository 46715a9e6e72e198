//! Manager evaluation report.
//!
//! Turns a pre-aggregated [`ReportPayload`] into a printable HTML document.

mod payload;
mod render;

pub use payload::{
    DepartmentAnalytics, EvaluationAnalytics, EvaluationRecord, EvaluationStatistics,
    RatingBucket, ReportFilters, ReportPayload,
};
pub use render::{
    EvaluationReportHtml, PAGE_BREAK, RECORDS_PER_PAGE, rating_label, render_evaluation_report,
};
