//! Attendance integration tests: status derivation and month filtering.

mod common;

use common::{seed_employee, TestApp};
use serde_json::json;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn check_in_before_workday_start_is_present() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "ماجد", "4000").await;

    let body = app
        .post(
            "/attendance",
            json!({
                "employee_id": employee_id,
                "day": "2025-06-01",
                "check_in": "07:55:00",
                "check_out": "16:00:00"
            }),
            201,
        )
        .await;

    assert_eq!(body["status"], "present");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn late_check_in_is_flagged() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "ماجد", "4000").await;

    let body = app
        .post(
            "/attendance",
            json!({
                "employee_id": employee_id,
                "day": "2025-06-01",
                "check_in": "08:20:00"
            }),
            201,
        )
        .await;

    assert_eq!(body["status"], "late");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn missing_check_in_is_absent() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "ماجد", "4000").await;

    let body = app
        .post(
            "/attendance",
            json!({ "employee_id": employee_id, "day": "2025-06-01" }),
            201,
        )
        .await;

    assert_eq!(body["status"], "absent");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn attendance_for_unknown_employee_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/attendance", app.api))
        .json(&json!({ "employee_id": 9999, "day": "2025-06-01", "check_in": "08:00:00" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "الموظف غير موجود");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn update_rederives_status_from_new_check_in() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "ماجد", "4000").await;

    let created = app
        .post(
            "/attendance",
            json!({
                "employee_id": employee_id,
                "day": "2025-06-01",
                "check_in": "09:30:00"
            }),
            201,
        )
        .await;
    assert_eq!(created["status"], "late");

    let response = app
        .client
        .put(format!("{}/attendance/{}", app.api, created["id"]))
        .json(&json!({ "check_in": "07:45:00", "check_out": "15:30:00" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let updated: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(updated["status"], "present");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn month_filter_expands_to_calendar_bounds() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "ماجد", "4000").await;

    for day in ["2025-05-31", "2025-06-01", "2025-06-30", "2025-07-01"] {
        app.post(
            "/attendance",
            json!({ "employee_id": employee_id, "day": day, "check_in": "08:00:00" }),
            201,
        )
        .await;
    }

    let june = app
        .get(&format!("/attendance?employee_id={}&month=2025-06", employee_id))
        .await;
    let days: Vec<&str> = june
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["day"].as_str().expect("day"))
        .collect();
    assert_eq!(days.len(), 2);
    assert!(days.contains(&"2025-06-01"));
    assert!(days.contains(&"2025-06-30"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn malformed_month_filter_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/attendance?month=June-2025", app.api))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "صيغة الشهر غير صحيحة، المطلوب YYYY-MM");

    app.cleanup().await;
}
