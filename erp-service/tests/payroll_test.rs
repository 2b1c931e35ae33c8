//! Payroll entry integration tests, including the employee report ledger.

mod common;

use common::{amount, dec, seed_employee, TestApp};
use serde_json::json;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn create_payroll_entry_succeeds() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "فيصل", "6000").await;

    let body = app
        .post(
            "/payroll",
            json!({
                "employee_id": employee_id,
                "entry_type": "salary",
                "amount": "6000",
                "entry_date": "2025-06-30",
                "note": "راتب يونيو"
            }),
            201,
        )
        .await;

    assert_eq!(body["entry_type"], "salary");
    assert_eq!(amount(&body["amount"]), dec("6000"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn zero_amount_entry_is_rejected() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "فيصل", "6000").await;

    let response = app
        .client
        .post(format!("{}/payroll", app.api))
        .json(&json!({
            "employee_id": employee_id,
            "entry_type": "advance",
            "amount": "0",
            "entry_date": "2025-06-15"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn list_filters_by_employee_and_type() {
    let app = TestApp::spawn().await;
    let first = seed_employee(&app, "فيصل", "6000").await;
    let second = seed_employee(&app, "نايف", "5000").await;

    for (employee_id, entry_type, amount) in [
        (first, "salary", "6000"),
        (first, "advance", "500"),
        (second, "salary", "5000"),
    ] {
        app.post(
            "/payroll",
            json!({
                "employee_id": employee_id,
                "entry_type": entry_type,
                "amount": amount,
                "entry_date": "2025-06-30"
            }),
            201,
        )
        .await;
    }

    let for_first = app.get(&format!("/payroll?employee_id={}", first)).await;
    assert_eq!(for_first.as_array().map(Vec::len), Some(2));

    let salaries = app.get("/payroll?entry_type=salary").await;
    assert_eq!(salaries.as_array().map(Vec::len), Some(2));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn employee_report_folds_earnings_against_advances() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "فيصل", "6000").await;

    for (entry_type, amount, date) in [
        ("salary", "6000", "2025-05-31"),
        ("advance", "1000", "2025-06-10"),
        ("bonus", "400", "2025-06-20"),
        ("deduction", "150", "2025-06-25"),
    ] {
        app.post(
            "/payroll",
            json!({
                "employee_id": employee_id,
                "entry_type": entry_type,
                "amount": amount,
                "entry_date": date
            }),
            201,
        )
        .await;
    }

    let statement = app.get(&format!("/employees/{}/report", employee_id)).await;

    assert_eq!(amount(&statement["total_debits"]), dec("6400"));
    assert_eq!(amount(&statement["total_credits"]), dec("1150"));
    assert_eq!(amount(&statement["closing_balance"]), dec("5250"));

    // Newest-first: the deduction is the first line.
    let lines = statement["lines"].as_array().expect("lines");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["date"], "2025-06-25");
    assert!(lines[0]["description"].as_str().expect("description").contains("خصم"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn bounded_employee_report_carries_opening_balance() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "فيصل", "6000").await;

    for (entry_type, amount, date) in [
        ("salary", "6000", "2025-05-31"),
        ("advance", "1000", "2025-06-10"),
    ] {
        app.post(
            "/payroll",
            json!({
                "employee_id": employee_id,
                "entry_type": entry_type,
                "amount": amount,
                "entry_date": date
            }),
            201,
        )
        .await;
    }

    let statement = app
        .get(&format!(
            "/employees/{}/report?start_date=2025-06-01&end_date=2025-06-30",
            employee_id
        ))
        .await;

    // May's salary folds into the opening balance.
    assert_eq!(amount(&statement["opening_balance"]), dec("6000"));
    assert_eq!(statement["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(amount(&statement["closing_balance"]), dec("5000"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn printable_payroll_report_is_arabic_html() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "فيصل", "6000").await;

    app.post(
        "/payroll",
        json!({
            "employee_id": employee_id,
            "entry_type": "salary",
            "amount": "6000",
            "entry_date": "2025-06-30"
        }),
        201,
    )
    .await;

    let response = app
        .client
        .get(format!("{}/employees/{}/report/print", app.api, employee_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or("").contains("text/html"))
        .unwrap_or(false));

    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("dir=\"rtl\""));
    assert!(html.contains("تقرير رواتب موظف"));
    assert!(html.contains("فيصل"));
    assert!(html.contains("window.print()"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn delete_payroll_entry_removes_it_from_the_report() {
    let app = TestApp::spawn().await;
    let employee_id = seed_employee(&app, "فيصل", "6000").await;

    let entry = app
        .post(
            "/payroll",
            json!({
                "employee_id": employee_id,
                "entry_type": "advance",
                "amount": "700",
                "entry_date": "2025-06-10"
            }),
            201,
        )
        .await;

    let response = app
        .client
        .delete(format!("{}/payroll/{}", app.api, entry["id"]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 204);

    let statement = app.get(&format!("/employees/{}/report", employee_id)).await;
    assert_eq!(statement["lines"].as_array().map(Vec::len), Some(0));

    app.cleanup().await;
}
