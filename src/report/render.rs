//! HTML rendering of the manager evaluation report.
//!
//! The output is a standalone HTML document meant for HTML-to-PDF export.
//! Detail rows are laid out in tables of [`RECORDS_PER_PAGE`] with a page
//! break between them.

use std::fmt::{self, Display, Formatter};

use rust_decimal::Decimal;

use super::payload::{EvaluationRecord, ReportPayload};

/// Detail rows per printed page.
pub const RECORDS_PER_PAGE: usize = 10;

/// Marker emitted between detail pages.
pub const PAGE_BREAK: &str = r#"<div class="page-break"></div>"#;

const STYLE: &str = "body{font-family:DejaVu Sans,sans-serif;font-size:11px;color:#222}\
h1{font-size:18px;margin:0}h2{font-size:14px;border-bottom:1px solid #ccc;padding-bottom:4px}\
table{width:100%;border-collapse:collapse;margin-bottom:12px}\
th,td{border:1px solid #ddd;padding:4px 6px;text-align:left}th{background:#f2f2f2}\
.cards{display:table;width:100%}.card{display:table-cell;padding:8px;border:1px solid #ddd}\
.card .value{font-size:16px;font-weight:bold}.muted{color:#777}\
.badge{padding:1px 6px;border-radius:3px}.page-break{page-break-after:always}";

/// Escapes text for HTML element content and attribute values.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Maps an overall rating on the 1-5 scale to its descriptive label.
pub fn rating_label(rating: Decimal) -> &'static str {
    if rating >= Decimal::new(45, 1) {
        "Outstanding"
    } else if rating >= Decimal::new(35, 1) {
        "Very Satisfactory"
    } else if rating >= Decimal::new(25, 1) {
        "Satisfactory"
    } else if rating >= Decimal::new(15, 1) {
        "Needs Improvement"
    } else {
        "Poor"
    }
}

fn rating_color(rating: Decimal) -> &'static str {
    match rating_label(rating) {
        "Outstanding" => "#d4edda",
        "Very Satisfactory" => "#d1ecf1",
        "Satisfactory" => "#fff3cd",
        _ => "#f8d7da",
    }
}

fn rating(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

/// A report payload rendered as HTML through [`Display`].
pub struct EvaluationReportHtml<'a>(pub &'a ReportPayload);

impl EvaluationReportHtml<'_> {
    fn header(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let payload = self.0;
        writeln!(f, "<header>")?;
        writeln!(f, "<h1>Manager Evaluation Report</h1>")?;
        writeln!(
            f,
            "<p class=\"muted\">Generated {}</p>",
            payload.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;

        let filters = payload.filters.active();
        if filters.is_empty() {
            writeln!(f, "<p class=\"muted\">Filters: none</p>")?;
        } else {
            write!(f, "<p class=\"muted\">Filters: ")?;
            for (i, (label, value)) in filters.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", label, Escaped(value))?;
            }
            writeln!(f, "</p>")?;
        }
        writeln!(f, "</header>")
    }

    fn statistics(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let stats = &self.0.statistics;
        writeln!(f, "<section><h2>Summary</h2><div class=\"cards\">")?;
        let cards = [
            ("Total evaluations", stats.total_evaluations.to_string()),
            ("Completed", stats.completed.to_string()),
            ("Pending", stats.pending.to_string()),
            ("Average rating", rating(stats.average_rating)),
            (
                "Highest",
                stats.highest_rating.map(rating).unwrap_or_else(|| "-".to_string()),
            ),
            (
                "Lowest",
                stats.lowest_rating.map(rating).unwrap_or_else(|| "-".to_string()),
            ),
        ];
        for (label, value) in cards {
            writeln!(
                f,
                "<div class=\"card\"><div class=\"muted\">{}</div><div class=\"value\">{}</div></div>",
                label, value
            )?;
        }
        writeln!(f, "</div></section>")
    }

    fn analytics(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let analytics = &self.0.analytics;
        if analytics.rating_distribution.is_empty() && analytics.departments.is_empty() {
            return Ok(());
        }

        writeln!(f, "<section><h2>Analytics</h2>")?;
        if !analytics.rating_distribution.is_empty() {
            let total: u32 = analytics.rating_distribution.iter().map(|b| b.count).sum();
            writeln!(
                f,
                "<table><thead><tr><th>Rating</th><th>Count</th><th>Share</th></tr></thead><tbody>"
            )?;
            for bucket in &analytics.rating_distribution {
                let share = if total == 0 {
                    Decimal::ZERO
                } else {
                    (Decimal::from(bucket.count) * Decimal::from(100) / Decimal::from(total))
                        .round_dp(1)
                };
                writeln!(
                    f,
                    "<tr><td>{}</td><td>{}</td><td>{}%</td></tr>",
                    Escaped(&bucket.label),
                    bucket.count,
                    share.normalize()
                )?;
            }
            writeln!(f, "</tbody></table>")?;
        }
        if !analytics.departments.is_empty() {
            writeln!(
                f,
                "<table><thead><tr><th>Department</th><th>Evaluations</th><th>Average</th></tr></thead><tbody>"
            )?;
            for dept in &analytics.departments {
                writeln!(
                    f,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    Escaped(&dept.department),
                    dept.evaluations,
                    rating(dept.average_rating)
                )?;
            }
            writeln!(f, "</tbody></table>")?;
        }
        writeln!(f, "</section>")
    }

    fn insights(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.insights.is_empty() {
            return Ok(());
        }
        writeln!(f, "<section><h2>Insights</h2><ul>")?;
        for insight in &self.0.insights {
            writeln!(f, "<li>{}</li>", Escaped(insight))?;
        }
        writeln!(f, "</ul></section>")
    }

    fn detail_page(f: &mut Formatter<'_>, records: &[EvaluationRecord]) -> fmt::Result {
        writeln!(
            f,
            "<table><thead><tr><th>Employee</th><th>Department</th><th>Evaluator</th>\
             <th>Period</th><th>Rating</th><th>Status</th><th>Date</th></tr></thead><tbody>"
        )?;
        for record in records {
            writeln!(
                f,
                "<tr><td>{}<br><span class=\"muted\">{}</span></td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><span class=\"badge\" style=\"background:{}\">{} ({})</span></td><td>{}</td><td>{}</td></tr>",
                Escaped(&record.employee_name),
                Escaped(&record.employee_id),
                Escaped(record.department.as_deref().unwrap_or("-")),
                Escaped(&record.evaluator),
                Escaped(&record.period),
                rating_color(record.overall_rating),
                rating(record.overall_rating),
                rating_label(record.overall_rating),
                Escaped(&record.status),
                record
                    .evaluated_on
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string())
            )?;
        }
        writeln!(f, "</tbody></table>")
    }

    fn details(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<section><h2>Evaluations</h2>")?;
        if self.0.evaluations.is_empty() {
            writeln!(f, "<p class=\"muted\">No evaluations match the selected filters.</p>")?;
        }
        for (page, records) in self.0.evaluations.chunks(RECORDS_PER_PAGE).enumerate() {
            if page > 0 {
                writeln!(f, "{}", PAGE_BREAK)?;
            }
            Self::detail_page(f, records)?;
        }
        writeln!(f, "</section>")
    }
}

impl Display for EvaluationReportHtml<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html><head><meta charset=\"utf-8\">")?;
        writeln!(f, "<title>Manager Evaluation Report</title>")?;
        writeln!(f, "<style>{}</style></head><body>", STYLE)?;
        self.header(f)?;
        self.statistics(f)?;
        self.analytics(f)?;
        self.insights(f)?;
        self.details(f)?;
        writeln!(f, "</body></html>")
    }
}

/// Renders the evaluation report as an HTML document.
///
/// # Example
///
/// ```
/// use hrms_engine::report::{render_evaluation_report, ReportPayload, EvaluationStatistics};
/// use chrono::Utc;
///
/// let payload = ReportPayload {
///     statistics: EvaluationStatistics::default(),
///     analytics: Default::default(),
///     insights: vec!["Ratings <improved> this quarter".to_string()],
///     evaluations: vec![],
///     filters: Default::default(),
///     generated_at: Utc::now(),
/// };
/// let html = render_evaluation_report(&payload);
/// assert!(html.contains("Ratings &lt;improved&gt; this quarter"));
/// ```
pub fn render_evaluation_report(payload: &ReportPayload) -> String {
    EvaluationReportHtml(payload).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::payload::{
        DepartmentAnalytics, EvaluationAnalytics, EvaluationStatistics, RatingBucket,
        ReportFilters,
    };
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(i: usize) -> EvaluationRecord {
        EvaluationRecord {
            employee_id: format!("emp_{:03}", i),
            employee_name: format!("Employee {}", i),
            department: Some("Operations".to_string()),
            evaluator: "J. Reyes".to_string(),
            period: "2026 H1".to_string(),
            overall_rating: Decimal::new(42, 1),
            status: "completed".to_string(),
            evaluated_on: NaiveDate::from_ymd_opt(2026, 3, 1),
        }
    }

    fn payload(records: usize) -> ReportPayload {
        ReportPayload {
            statistics: EvaluationStatistics {
                total_evaluations: records as u32,
                completed: records as u32,
                pending: 0,
                average_rating: Decimal::new(42, 1),
                highest_rating: Some(Decimal::new(48, 1)),
                lowest_rating: None,
            },
            analytics: EvaluationAnalytics::default(),
            insights: vec![],
            evaluations: (0..records).map(record).collect(),
            filters: ReportFilters::default(),
            generated_at: Utc.with_ymd_and_hms(2026, 3, 20, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_page_break_every_ten_records() {
        for (records, breaks) in [(0, 0), (1, 0), (10, 0), (11, 1), (20, 1), (21, 2), (35, 3)] {
            let html = render_evaluation_report(&payload(records));
            assert_eq!(
                html.matches(PAGE_BREAK).count(),
                breaks,
                "{} records should produce {} page breaks",
                records,
                breaks
            );
        }
    }

    #[test]
    fn test_every_record_is_rendered() {
        let html = render_evaluation_report(&payload(23));
        assert!(html.contains("emp_000"));
        assert!(html.contains("emp_022"));
        assert_eq!(html.matches("<tbody>").count(), 3);
    }

    #[test]
    fn test_empty_report_message() {
        let html = render_evaluation_report(&payload(0));
        assert!(html.contains("No evaluations match the selected filters."));
    }

    #[test]
    fn test_header_shows_generation_time_and_filters() {
        let mut p = payload(1);
        p.filters.department = Some("R&D".to_string());
        let html = render_evaluation_report(&p);

        assert!(html.contains("Generated 2026-03-20 09:30 UTC"));
        assert!(html.contains("Department: R&amp;D"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut p = payload(1);
        p.evaluations[0].employee_name = "<script>alert('x')</script>".to_string();
        let html = render_evaluation_report(&p);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_statistics_cards() {
        let html = render_evaluation_report(&payload(3));
        assert!(html.contains("Average rating</div><div class=\"value\">4.2"));
        assert!(html.contains("Highest</div><div class=\"value\">4.8"));
        assert!(html.contains("Lowest</div><div class=\"value\">-"));
    }

    #[test]
    fn test_analytics_tables() {
        let mut p = payload(0);
        p.analytics = EvaluationAnalytics {
            rating_distribution: vec![
                RatingBucket {
                    label: "Outstanding".to_string(),
                    count: 1,
                },
                RatingBucket {
                    label: "Satisfactory".to_string(),
                    count: 3,
                },
            ],
            departments: vec![DepartmentAnalytics {
                department: "Finance".to_string(),
                evaluations: 4,
                average_rating: Decimal::new(3875, 3),
            }],
        };
        let html = render_evaluation_report(&p);

        assert!(html.contains("<td>Outstanding</td><td>1</td><td>25%</td>"));
        assert!(html.contains("<td>Satisfactory</td><td>3</td><td>75%</td>"));
        assert!(html.contains("<td>Finance</td><td>4</td><td>3.88</td>"));
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!(rating_label(Decimal::new(50, 1)), "Outstanding");
        assert_eq!(rating_label(Decimal::new(45, 1)), "Outstanding");
        assert_eq!(rating_label(Decimal::new(40, 1)), "Very Satisfactory");
        assert_eq!(rating_label(Decimal::new(30, 1)), "Satisfactory");
        assert_eq!(rating_label(Decimal::new(20, 1)), "Needs Improvement");
        assert_eq!(rating_label(Decimal::new(10, 1)), "Poor");
    }

    #[test]
    fn test_insights_are_listed() {
        let mut p = payload(0);
        p.insights = vec!["Finance leads ratings".to_string()];
        let html = render_evaluation_report(&p);
        assert!(html.contains("<li>Finance leads ratings</li>"));
    }
}
