//! Integration tests for the HR engine HTTP API.
//!
//! This test suite drives the router end to end:
//! - Hierarchy reconstruction from the store
//! - Monthly leave allocation and its idempotence
//! - Punch-in / punch-out / undo with geofencing
//! - Attendance summaries
//! - Payroll pro-rating
//! - Error cases

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use hr_engine::api::{AppState, create_router};
use hr_engine::attendance::EARTH_RADIUS_METERS;
use hr_engine::config::ConfigLoader;
use hr_engine::models::{AttendanceRecord, Employee, EmployeeStatus, Position, WorkLocation};
use hr_engine::store::{EmployeeRecordStore, InMemoryStore};

// =============================================================================
// Test Helpers
// =============================================================================

const OFFICE_LAT: f64 = 12.9716;
const OFFICE_LON: f64 = 77.5946;

fn employee(id: &str, position: Position, department: &str) -> Employee {
    Employee::new(id, id, position, department)
}

fn roster() -> Vec<Employee> {
    let mut field_worker = employee("emp_004", Position::Employee, "Engineering");
    field_worker.base_salary = Some(decimal("66000"));
    field_worker.work_location = Some(WorkLocation {
        latitude: OFFICE_LAT,
        longitude: OFFICE_LON,
        radius_meters: 100.0,
    });

    let mut intern = employee("emp_005", Position::Intern, "Engineering");
    intern.status = EmployeeStatus::Probation;

    vec![
        employee("emp_001", Position::Ceo, "Executive"),
        employee("emp_002", Position::Manager, "Engineering"),
        employee("emp_003", Position::DeptHead, "Engineering"),
        field_worker,
        intern,
        employee("emp_006", Position::Employee, "Remote"),
    ]
}

fn create_test_store() -> Arc<InMemoryStore> {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = InMemoryStore::with_employees(*config.leave_settings(), roster())
        .expect("Failed to build store");
    Arc::new(store)
}

fn create_router_for_store(store: Arc<InMemoryStore>) -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::new(&config, store).expect("Failed to build state");
    create_router(state)
}

fn create_router_for_test() -> Router {
    create_router_for_store(create_test_store())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A point `meters` due north of the office.
fn north_of_office(meters: f64) -> Value {
    json!({
        "location": {
            "latitude": OFFICE_LAT + (meters / EARTH_RADIUS_METERS).to_degrees(),
            "longitude": OFFICE_LON,
        }
    })
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

fn record(id: &str, employee_id: &str, punch_in: &str, hours: i64) -> AttendanceRecord {
    let punch_in: DateTime<Utc> = punch_in.parse().unwrap();
    AttendanceRecord {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        punch_in_time: punch_in,
        punch_out_time: Some(punch_in + Duration::hours(hours)),
        date: punch_in.date_naive(),
    }
}

fn node_ids(node: &Value, out: &mut Vec<String>) {
    out.push(node["employee"]["id"].as_str().unwrap().to_string());
    for child in node["children"].as_array().unwrap() {
        node_ids(child, out);
    }
}

// =============================================================================
// Hierarchy
// =============================================================================

#[tokio::test]
async fn test_hierarchy_places_everyone_once() {
    let (status, body) = send(create_router_for_test(), "GET", "/hierarchy", None).await;

    assert_eq!(status, StatusCode::OK);
    let roots = body.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["employee"]["position"], "CEO");

    let mut ids = Vec::new();
    node_ids(&roots[0], &mut ids);
    ids.sort();
    assert_eq!(
        ids,
        vec!["emp_001", "emp_002", "emp_003", "emp_004", "emp_005", "emp_006"]
    );
}

#[tokio::test]
async fn test_hierarchy_nests_department_chain() {
    let (_, body) = send(create_router_for_test(), "GET", "/hierarchy", None).await;

    let ceo = &body[0];
    let manager = ceo["children"]
        .as_array()
        .unwrap()
        .iter()
        .find(|node| node["employee"]["id"] == "emp_002")
        .unwrap();
    let dept_head = &manager["children"][0];
    assert_eq!(dept_head["employee"]["id"], "emp_003");

    let mut team: Vec<&str> = dept_head["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["employee"]["id"].as_str().unwrap())
        .collect();
    team.sort();
    assert_eq!(team, vec!["emp_004", "emp_005"]);

    // No Dept. Head in "Remote", so the employee reports to the CEO
    assert!(
        ceo["children"]
            .as_array()
            .unwrap()
            .iter()
            .any(|node| node["employee"]["id"] == "emp_006")
    );
}

// =============================================================================
// Leave allocation
// =============================================================================

#[tokio::test]
async fn test_allocation_grants_and_zeroes() {
    let store = create_test_store();
    let router = create_router_for_store(Arc::clone(&store));

    let (status, body) = send(router, "POST", "/leave/allocations", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["granted"].as_array().unwrap().len(), 5);
    assert_eq!(body["zeroed"], json!(["emp_005"]));
    assert!(body["failed"].as_array().unwrap().is_empty());

    let granted = store.get_employee("emp_004").unwrap();
    assert_eq!(granted.leave_balance.short, 2);
    assert_eq!(granted.leave_balance.sick, 1);
    assert_eq!(granted.leave_balance.personal, 1);

    let intern = store.get_employee("emp_005").unwrap();
    assert_eq!(intern.leave_balance.short, 0);
    assert!(intern.last_leave_allocation.is_some());
}

#[tokio::test]
async fn test_allocation_twice_in_a_month_is_a_no_op() {
    let store = create_test_store();
    let router = create_router_for_store(Arc::clone(&store));

    send(router.clone(), "POST", "/leave/allocations", None).await;

    let mut spent = store.get_employee("emp_004").unwrap();
    spent.leave_balance.sick = 0;
    store.update_employee(spent).unwrap();

    let (status, body) = send(router, "POST", "/leave/allocations", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["granted"].as_array().unwrap().is_empty());
    assert_eq!(body["skipped"].as_array().unwrap().len(), 6);
    assert_eq!(store.get_employee("emp_004").unwrap().leave_balance.sick, 0);
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_punch_in_within_radius_then_out() {
    let router = create_router_for_test();

    let (status, record) = send(
        router.clone(),
        "POST",
        "/attendance/emp_004/punch-in",
        Some(north_of_office(50.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["employee_id"], "emp_004");
    assert!(record["punch_out_time"].is_null());

    let (status, body) = send(router.clone(), "GET", "/attendance/emp_004/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "in");
    assert_eq!(body["record"]["id"], record["id"]);
    assert!(body["elapsed"].as_str().unwrap().starts_with("00:00:"));

    let (status, closed) = send(router.clone(), "POST", "/attendance/emp_004/punch-out", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["id"], record["id"]);
    assert!(!closed["punch_out_time"].is_null());

    let (_, body) = send(router, "GET", "/attendance/emp_004/status", None).await;
    assert_eq!(body["state"], "out");
    assert!(body["elapsed"].is_null());
}

#[tokio::test]
async fn test_punch_in_outside_radius_is_forbidden() {
    let store = create_test_store();
    let router = create_router_for_store(Arc::clone(&store));

    let (status, body) = send(
        router,
        "POST",
        "/attendance/emp_004/punch-in",
        Some(north_of_office(149.5)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "OUT_OF_RANGE");
    assert!(body["message"].as_str().unwrap().contains("150m"));
    assert!(body["message"].as_str().unwrap().contains("100m"));
    assert!(store.list_attendance_records().unwrap().is_empty());
}

#[tokio::test]
async fn test_punch_in_location_failures() {
    let router = create_router_for_test();

    let (status, body) = send(
        router.clone(),
        "POST",
        "/attendance/emp_004/punch-in",
        Some(json!({ "location_error": "permission_denied" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "LOCATION_PERMISSION_DENIED");

    let (status, body) = send(
        router.clone(),
        "POST",
        "/attendance/emp_004/punch-in",
        Some(json!({ "location_error": "unavailable" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "LOCATION_UNAVAILABLE");

    // Geofenced employee with no location at all
    let (status, _) = send(router, "POST", "/attendance/emp_004/punch-in", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_punch_in_without_geofence_needs_no_location() {
    let router = create_router_for_test();

    let (status, _) = send(router.clone(), "POST", "/attendance/emp_006/punch-in", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(router, "POST", "/attendance/emp_006/punch-in", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_PUNCHED_IN");
}

#[tokio::test]
async fn test_punch_out_without_open_record_conflicts() {
    let (status, body) = send(
        create_router_for_test(),
        "POST",
        "/attendance/emp_006/punch-out",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_PUNCHED_IN");
}

#[tokio::test]
async fn test_undo_punch_in_deletes_record() {
    let store = create_test_store();
    let router = create_router_for_store(Arc::clone(&store));

    send(router.clone(), "POST", "/attendance/emp_006/punch-in", None).await;
    assert_eq!(store.list_attendance_records().unwrap().len(), 1);

    let (status, body) = send(router.clone(), "DELETE", "/attendance/emp_006/punch-in", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee_id"], "emp_006");
    assert!(store.list_attendance_records().unwrap().is_empty());

    let (_, body) = send(router, "GET", "/attendance/emp_006/status", None).await;
    assert_eq!(body["state"], "out");
}

#[tokio::test]
async fn test_unknown_employee_is_not_found() {
    let (status, body) = send(
        create_router_for_test(),
        "GET",
        "/attendance/emp_404/status",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
    assert_eq!(body["message"], "Employee not found: emp_404");
}

#[tokio::test]
async fn test_malformed_punch_in_body_is_rejected() {
    let router = create_router_for_test();
    let request = Request::builder()
        .method("POST")
        .uri("/attendance/emp_004/punch-in")
        .header("Content-Type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_attendance_summary_over_window() {
    let store = create_test_store();
    for r in [
        record("r1", "emp_004", "2026-01-05T09:00:00Z", 8),
        record("r2", "emp_004", "2026-01-06T09:00:00Z", 4),
        record("r3", "emp_004", "2026-01-06T14:00:00Z", 2),
        record("r4", "emp_006", "2026-01-07T09:00:00Z", 8),
        record("r5", "emp_004", "2026-02-02T09:00:00Z", 8),
    ] {
        store.append_attendance_record(r).unwrap();
    }
    let router = create_router_for_store(store);

    let (status, body) = send(
        router,
        "GET",
        "/attendance/summary?start=2026-01-01&end=2026-01-31",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"].as_array().unwrap().len(), 4);
    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["employee_id"], "emp_004");
    assert_eq!(summaries[0]["days_worked"], 2);
    assert_eq!(summaries[0]["total_duration"], "14:00:00");
}

#[tokio::test]
async fn test_attendance_summary_rejects_bad_window() {
    let router = create_router_for_test();

    let (status, body) = send(
        router.clone(),
        "GET",
        "/attendance/summary?start=2026-02-01&end=2026-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(router, "GET", "/attendance/summary?start=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_pro_rates_attended_days() {
    let store = create_test_store();
    // Eleven distinct weekdays in January 2026 (22 working days)
    for day in 5..=15 {
        store
            .append_attendance_record(record(
                &format!("r{}", day),
                "emp_004",
                &format!("2026-01-{:02}T09:00:00Z", day),
                8,
            ))
            .unwrap();
    }
    let router = create_router_for_store(store);

    let (status, body) = send(router, "GET", "/payroll/2026/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "2026-01");
    assert_eq!(body["official_working_days"], 22);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    let paid = rows.iter().find(|row| row["employee_id"] == "emp_004").unwrap();
    assert_eq!(paid["attended_days"], 11);
    assert_eq!(
        decimal(paid["payable_salary"].as_str().unwrap()),
        decimal("33000.00")
    );

    let unpaid = rows.iter().find(|row| row["employee_id"] == "emp_001").unwrap();
    assert_eq!(decimal(unpaid["payable_salary"].as_str().unwrap()), Decimal::ZERO);
    assert_eq!(decimal(body["total_payable"].as_str().unwrap()), decimal("33000.00"));
}

#[tokio::test]
async fn test_payroll_invalid_month_is_rejected() {
    let router = create_router_for_test();

    let (status, body) = send(router.clone(), "GET", "/payroll/2026/13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(router, "GET", "/payroll/2026/january", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payroll_overflowing_salary_is_a_validation_error() {
    let store = create_test_store();
    let mut rich = store.get_employee("emp_004").unwrap();
    rich.base_salary = Some(Decimal::MAX);
    store.update_employee(rich).unwrap();
    // Weekend punches push attended days past February 2026's 20 working days
    for day in 1..=28 {
        store
            .append_attendance_record(record(
                &format!("r{}", day),
                "emp_004",
                &format!("2026-02-{:02}T09:00:00Z", day),
                8,
            ))
            .unwrap();
    }
    let router = create_router_for_store(store);

    let (status, body) = send(router, "GET", "/payroll/2026/2", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("base_salary"));
}
