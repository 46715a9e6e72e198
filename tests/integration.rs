//! Integration tests for the HRMS leave API.
//!
//! This test suite covers:
//! - Leave previews (paid, split, unpaid, half-day)
//! - Tenure eligibility
//! - Day limits and capped leave types
//! - Overlap and cooldown refusals
//! - Balance summaries
//! - Evaluation report rendering
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use hrms_engine::api::{AppState, create_router};
use hrms_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/policy").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("Content-Type", "application/json");
    }
    let response = router
        .oneshot(builder.body(body.map(Body::from).unwrap_or_else(Body::empty)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body_bytes.to_vec(), content_type)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes, _) = send(router, "POST", uri, Some(body.to_string())).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_preview(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/leave-requests/preview", body).await
}

fn employee(hire_date: &str) -> Value {
    json!({
        "id": "emp_001",
        "name": "Maria Santos",
        "hire_date": hire_date,
        "department": "Operations"
    })
}

fn application(leave_type: &str, start: &str, end: &str) -> Value {
    json!({
        "leave_type": leave_type,
        "start_date": start,
        "end_date": end,
        "reason": "Personal"
    })
}

fn history_record(id: &str, leave_type: &str, start: &str, end: &str, days: &str, status: &str) -> Value {
    json!({
        "id": id,
        "leave_type": leave_type,
        "start_date": start,
        "end_date": end,
        "days": days,
        "status": status
    })
}

fn preview_request(hire_date: &str, application: Value, history: Vec<Value>) -> Value {
    json!({
        "employee": employee(hire_date),
        "application": application,
        "history": history,
        "as_of": "2026-03-20"
    })
}

fn assert_days(result: &Value, field: &str, expected: &str) {
    let actual = result["breakdown"][field].as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

// =============================================================================
// SECTION 1: Payment breakdown
// =============================================================================

#[tokio::test]
async fn test_sick_leave_split_against_sil() {
    // 14 months of service, 6 of 8 SIL days used, 5 requested
    let request = preview_request(
        "2025-01-15",
        application("Sick Leave", "2026-03-23", "2026-03-27"),
        vec![history_record("lr_1", "Sick Leave", "2026-01-12", "2026-01-17", "6", "approved")],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "requested_days", "5");
    assert_days(&result, "with_pay_days", "2");
    assert_days(&result, "without_pay_days", "3");
    assert_eq!(result["breakdown"]["is_split"], true);
    assert!(
        result["breakdown"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Only 2 days are with pay")
    );
}

#[tokio::test]
async fn test_emergency_leave_shares_sil_bucket() {
    // Sick and Emergency draw on the same 8 days
    let request = preview_request(
        "2020-01-01",
        application("Emergency Leave", "2026-03-23", "2026-03-24"),
        vec![
            history_record("lr_1", "Sick Leave", "2026-01-05", "2026-01-09", "5", "completed"),
            history_record("lr_2", "Emergency Leave", "2026-02-02", "2026-02-03", "2", "approved"),
        ],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "with_pay_days", "1");
    assert_days(&result, "without_pay_days", "1");
    assert_eq!(result["breakdown"]["source"], "sil");
}

#[tokio::test]
async fn test_vacation_fully_paid() {
    let request = preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-04-06", "2026-04-10"),
        vec![],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "with_pay_days", "5");
    assert_days(&result, "without_pay_days", "0");
    assert_eq!(result["breakdown"]["is_split"], false);
    assert_eq!(
        result["breakdown"]["message"],
        "All 5 days are with pay from your Vacation Leave balance."
    );
}

#[tokio::test]
async fn test_vacation_beyond_entitlement_is_accepted_with_unpaid_excess() {
    let request = preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-04-01", "2026-04-18"),
        vec![],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "requested_days", "18");
    assert_days(&result, "with_pay_days", "15");
    assert_days(&result, "without_pay_days", "3");

    let codes: Vec<&str> = result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"EXCEEDS_ENTITLEMENT"));
    assert!(codes.contains(&"UNPAID_DAYS"));
}

#[tokio::test]
async fn test_exhausted_balance_is_all_unpaid() {
    let request = preview_request(
        "2020-01-01",
        application("Paternity Leave", "2026-03-23", "2026-03-24"),
        vec![history_record("lr_1", "Paternity Leave", "2026-01-05", "2026-01-11", "7", "completed")],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "with_pay_days", "0");
    assert_days(&result, "without_pay_days", "2");
    assert_eq!(
        result["breakdown"]["message"],
        "Your Paternity Leave balance is used up. All 2 days will be without pay."
    );
}

#[tokio::test]
async fn test_rejected_and_cancelled_history_does_not_consume_balance() {
    let request = preview_request(
        "2020-01-01",
        application("Sick Leave", "2026-03-23", "2026-03-24"),
        vec![
            history_record("lr_1", "Sick Leave", "2026-01-05", "2026-01-12", "8", "rejected"),
            history_record("lr_2", "Sick Leave", "2026-02-02", "2026-02-09", "8", "cancelled"),
        ],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "with_pay_days", "2");
    assert_eq!(
        normalize_decimal(result["usage"]["sil"]["remaining"].as_str().unwrap()),
        "8"
    );
}

// =============================================================================
// SECTION 2: Tenure
// =============================================================================

#[tokio::test]
async fn test_under_twelve_months_is_unpaid() {
    let request = preview_request(
        "2025-09-01",
        application("Vacation Leave", "2026-03-23", "2026-03-25"),
        vec![],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["tenure"]["months"], 6);
    assert_days(&result, "with_pay_days", "0");
    assert_days(&result, "without_pay_days", "3");
    assert_eq!(result["breakdown"]["source"], "ineligible");
}

#[tokio::test]
async fn test_exactly_twelve_months_is_eligible() {
    let request = preview_request(
        "2025-03-20",
        application("Sick Leave", "2026-03-23", "2026-03-23"),
        vec![],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["tenure"]["months"], 12);
    assert_days(&result, "with_pay_days", "1");
}

#[tokio::test]
async fn test_future_hire_date_is_rejected() {
    let request = preview_request(
        "2026-06-01",
        application("Sick Leave", "2026-03-23", "2026-03-23"),
        vec![],
    );

    let (status, result) = post_preview(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_EMPLOYEE");
}

// =============================================================================
// SECTION 3: Day count
// =============================================================================

#[tokio::test]
async fn test_half_day_counts_half() {
    let mut app = application("Vacation Leave", "2026-03-23", "2026-03-23");
    app["duration"] = json!("half_day");
    app["half_day_period"] = json!("am");

    let (status, result) = post_preview(preview_request("2020-01-01", app, vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(normalize_decimal(result["day_count"]["days"].as_str().unwrap()), "0.5");
    assert_eq!(normalize_decimal(result["day_count"]["hours"].as_str().unwrap()), "4");
}

#[tokio::test]
async fn test_half_day_without_period_is_unprocessable() {
    let mut app = application("Vacation Leave", "2026-03-23", "2026-03-23");
    app["duration"] = json!("half_day");

    let (status, result) = post_preview(preview_request("2020-01-01", app, vec![])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_LEAVE_REQUEST");
    assert!(result["errors"]["half_day_period"].is_array());
}

#[tokio::test]
async fn test_end_before_start_is_unprocessable() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-03-25", "2026-03-23"),
        vec![],
    ))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "INVALID_DATE_RANGE");
}

// =============================================================================
// SECTION 4: Day limits
// =============================================================================

#[tokio::test]
async fn test_bereavement_over_cap_is_refused() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Bereavement Leave", "2026-03-23", "2026-03-26"),
        vec![],
    ))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "DAY_LIMIT_EXCEEDED");
    assert!(result["message"].as_str().unwrap().contains("maximum of 3 days"));
}

#[tokio::test]
async fn test_birthday_leave_single_day_is_accepted() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Birthday Leave", "2026-03-23", "2026-03-23"),
        vec![],
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_days(&result, "with_pay_days", "1");
}

#[tokio::test]
async fn test_unknown_leave_type() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Sabbatical Leave", "2026-03-23", "2026-03-23"),
        vec![],
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_LEAVE_TYPE");
}

// =============================================================================
// SECTION 5: Overlap and cooldown
// =============================================================================

#[tokio::test]
async fn test_overlap_with_pending_request_is_refused() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-03-25", "2026-03-27"),
        vec![history_record("lr_1", "Sick Leave", "2026-03-23", "2026-03-25", "3", "pending")],
    ))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "OVERLAPPING_LEAVE");
    assert!(result["errors"]["start_date"][0].as_str().unwrap().contains("pending"));
}

#[tokio::test]
async fn test_cooldown_six_days_after_is_refused() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-03-10", "2026-03-10"),
        vec![history_record("lr_1", "Vacation Leave", "2026-03-02", "2026-03-04", "3", "approved")],
    ))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "COOLDOWN_ACTIVE");
    assert!(result["message"].as_str().unwrap().contains("2026-03-11"));
}

#[tokio::test]
async fn test_cooldown_seven_days_after_is_accepted() {
    let (status, _) = post_preview(preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-03-11", "2026-03-11"),
        vec![history_record("lr_1", "Vacation Leave", "2026-03-02", "2026-03-04", "3", "approved")],
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// SECTION 6: Audit trace
// =============================================================================

#[tokio::test]
async fn test_preview_carries_full_audit_trace() {
    let (status, result) = post_preview(preview_request(
        "2020-01-01",
        application("Vacation Leave", "2026-04-06", "2026-04-07"),
        vec![],
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let rule_ids: Vec<&str> = result["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "tenure_classification",
            "leave_day_count",
            "leave_day_limit",
            "leave_schedule",
            "leave_usage_summary",
            "payment_breakdown"
        ]
    );
    assert!(result["preview_id"].is_string());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// SECTION 7: Balances, catalog, health
// =============================================================================

#[tokio::test]
async fn test_leave_balances() {
    let body = json!({
        "employee": employee("2020-01-01"),
        "history": [
            history_record("lr_1", "Vacation Leave", "2026-02-02", "2026-02-04", "3", "approved"),
            history_record("lr_2", "Sick Leave", "2026-01-12", "2026-01-13", "2", "pending"),
            history_record("lr_3", "Vacation Leave", "2025-12-01", "2025-12-05", "5", "completed")
        ],
        "as_of": "2026-03-20"
    });

    let (status, result) = post_json(create_router_for_test(), "/leave-balances", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["year"], 2026);
    let vacation = result["leave_types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["leave_type"] == "Vacation Leave")
        .unwrap();
    assert_eq!(normalize_decimal(vacation["used"].as_str().unwrap()), "3");
    assert_eq!(normalize_decimal(vacation["remaining"].as_str().unwrap()), "12");
    assert_eq!(normalize_decimal(result["sil"]["remaining"].as_str().unwrap()), "6");
}

#[tokio::test]
async fn test_leave_types_catalog() {
    let (status, bytes, _) = send(create_router_for_test(), "GET", "/leave-types", None).await;
    let catalog: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = catalog
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 10);
    assert!(names.contains(&"Women's Special Leave"));
}

#[tokio::test]
async fn test_health() {
    let (status, bytes, _) = send(create_router_for_test(), "GET", "/health", None).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// SECTION 8: Evaluation report
// =============================================================================

fn evaluation(i: usize) -> Value {
    json!({
        "employee_id": format!("emp_{:03}", i),
        "employee_name": format!("Employee {}", i),
        "department": "Finance",
        "evaluator": "J. Reyes",
        "period": "2026 H1",
        "overall_rating": "3.8",
        "status": "completed",
        "evaluated_on": "2026-03-01"
    })
}

#[tokio::test]
async fn test_evaluation_report_renders_html_with_page_breaks() {
    let body = json!({
        "statistics": {
            "total_evaluations": 25,
            "completed": 25,
            "pending": 0,
            "average_rating": "3.8"
        },
        "insights": ["Finance improved on last period"],
        "evaluations": (0..25).map(evaluation).collect::<Vec<_>>(),
        "filters": {"department": "Finance"},
        "generated_at": "2026-03-20T09:30:00Z"
    });

    let (status, bytes, content_type) = send(
        create_router_for_test(),
        "POST",
        "/reports/manager-evaluations",
        Some(body.to_string()),
    )
    .await;
    let html = String::from_utf8(bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(html.matches(r#"<div class="page-break"></div>"#).count(), 2);
    assert!(html.contains("Department: Finance"));
    assert!(html.contains("Very Satisfactory"));
}

// =============================================================================
// SECTION 9: Malformed requests
// =============================================================================

#[tokio::test]
async fn test_malformed_json() {
    let (status, bytes, _) = send(
        create_router_for_test(),
        "POST",
        "/leave-requests/preview",
        Some("{not json".to_string()),
    )
    .await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field() {
    let body = json!({
        "employee": employee("2020-01-01"),
        "application": {"leave_type": "Sick Leave", "start_date": "2026-03-23"}
    });

    let (status, result) = post_preview(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("end_date"));
}
