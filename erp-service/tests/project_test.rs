//! Project integration tests: lifecycle, filters and the project report.

mod common;

use common::{amount, dec, seed_client, seed_project, TestApp};
use serde_json::json;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn new_project_defaults_to_active() {
    let app = TestApp::spawn().await;

    let body = app
        .post(
            "/projects",
            json!({
                "name": "مجمع سكني",
                "location": "حي النرجس",
                "budget": "2500000",
                "start_date": "2025-03-01",
                "deadline": "2026-03-01"
            }),
            201,
        )
        .await;

    assert_eq!(body["status"], "active");
    assert_eq!(body["location"], "حي النرجس");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn project_with_unknown_client_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/projects", app.api))
        .json(&json!({ "name": "مشروع معلق", "client_id": 9999 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "الشركة غير موجودة");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn list_projects_filters_by_status_and_client() {
    let app = TestApp::spawn().await;
    let client_id = seed_client(&app, "شركة الإنشاءات").await;

    app.post(
        "/projects",
        json!({ "name": "مشروع جارٍ", "client_id": client_id }),
        201,
    )
    .await;
    app.post(
        "/projects",
        json!({ "name": "مشروع منجز", "status": "completed" }),
        201,
    )
    .await;

    let active = app.get("/projects?status=active").await;
    assert_eq!(active.as_array().map(Vec::len), Some(1));
    assert_eq!(active[0]["name"], "مشروع جارٍ");

    let for_client = app.get(&format!("/projects?client_id={}", client_id)).await;
    assert_eq!(for_client.as_array().map(Vec::len), Some(1));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn completing_a_project_via_update() {
    let app = TestApp::spawn().await;
    let project_id = seed_project(&app, "تشطيبات فيلا").await;

    let response = app
        .client
        .put(format!("{}/projects/{}", app.api, project_id))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let project = app.get(&format!("/projects/{}", project_id)).await;
    assert_eq!(project["status"], "completed");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn project_report_nets_invoices_against_expenses() {
    let app = TestApp::spawn().await;
    let client_id = seed_client(&app, "شركة الإنشاءات").await;
    let project_id = seed_project(&app, "مستودعات لوجستية").await;

    app.post(
        "/material-invoices",
        json!({
            "client_id": client_id,
            "project_id": project_id,
            "invoice_number": "MAT-9",
            "invoice_date": "2025-06-01",
            "total_amount": "1500"
        }),
        201,
    )
    .await;
    app.post(
        "/expenses",
        json!({
            "description": "أجور عمالة",
            "category": "عمالة",
            "amount": "400",
            "spent_on": "2025-06-10",
            "project_id": project_id
        }),
        201,
    )
    .await;

    let statement = app.get(&format!("/projects/{}/report", project_id)).await;

    assert_eq!(amount(&statement["total_debits"]), dec("1500"));
    assert_eq!(amount(&statement["total_credits"]), dec("400"));
    assert_eq!(amount(&statement["closing_balance"]), dec("1100"));

    let lines = statement["lines"].as_array().expect("lines");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["description"], "فاتورة توريد رقم MAT-9");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn printable_project_report_shows_the_location() {
    let app = TestApp::spawn().await;

    let created = app
        .post(
            "/projects",
            json!({ "name": "جسر مشاة", "location": "طريق الملك فهد" }),
            201,
        )
        .await;

    let response = app
        .client
        .get(format!(
            "{}/projects/{}/report/print",
            app.api, created["id"]
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("تقرير مشروع"));
    assert!(html.contains("جسر مشاة (طريق الملك فهد)"));

    app.cleanup().await;
}
