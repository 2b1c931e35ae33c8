//! Expense integration tests: lifecycle, list filters and the CSV export.

mod common;

use common::{amount, dec, seed_custody, seed_project, TestApp};
use serde_json::json;

async fn seed_expense(app: &TestApp, description: &str, category: &str, spent_on: &str) -> i64 {
    let body = app
        .post(
            "/expenses",
            json!({
                "description": description,
                "category": category,
                "amount": "250",
                "spent_on": spent_on,
                "responsible": "ماجد"
            }),
            201,
        )
        .await;
    body["id"].as_i64().expect("expense id")
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn expense_records_all_fields() {
    let app = TestApp::spawn().await;
    let custody_id = seed_custody(&app, "عهدة الموقع", "سالم", "3000").await;
    let project_id = seed_project(&app, "برج مكاتب").await;

    let body = app
        .post(
            "/expenses",
            json!({
                "description": "إيجار رافعة",
                "category": "معدات",
                "amount": "850.75",
                "spent_on": "2025-04-12",
                "responsible": "سالم",
                "custody_id": custody_id,
                "project_id": project_id
            }),
            201,
        )
        .await;

    assert_eq!(body["description"], "إيجار رافعة");
    assert_eq!(body["category"], "معدات");
    assert_eq!(amount(&body["amount"]), dec("850.75"));
    assert_eq!(body["custody_id"].as_i64(), Some(custody_id));
    assert_eq!(body["project_id"].as_i64(), Some(project_id));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn expense_against_unknown_custody_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/expenses", app.api))
        .json(&json!({
            "description": "وقود",
            "category": "محروقات",
            "amount": "100",
            "spent_on": "2025-04-01",
            "custody_id": 9999
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "العهدة غير موجودة");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn list_expenses_filters_by_category_date_and_search() {
    let app = TestApp::spawn().await;
    seed_expense(&app, "شراء أسمنت مقاوم", "مواد بناء", "2025-03-05").await;
    seed_expense(&app, "نقل معدات", "نقل", "2025-03-20").await;
    seed_expense(&app, "شراء حديد تسليح", "مواد بناء", "2025-05-02").await;

    let by_category = app.get("/expenses?category=مواد بناء").await;
    assert_eq!(by_category.as_array().map(Vec::len), Some(2));

    let march = app
        .get("/expenses?start_date=2025-03-01&end_date=2025-03-31")
        .await;
    assert_eq!(march.as_array().map(Vec::len), Some(2));

    let search = app.get("/expenses?search=حديد").await;
    assert_eq!(search.as_array().map(Vec::len), Some(1));
    assert_eq!(search[0]["description"], "شراء حديد تسليح");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn updating_an_expense_keeps_omitted_fields() {
    let app = TestApp::spawn().await;
    let expense_id = seed_expense(&app, "صيانة مولد", "صيانة", "2025-04-01").await;

    let response = app
        .client
        .put(format!("{}/expenses/{}", app.api, expense_id))
        .json(&json!({ "amount": "310.40" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    assert_eq!(amount(&body["amount"]), dec("310.40"));
    assert_eq!(body["description"], "صيانة مولد");
    assert_eq!(body["responsible"], "ماجد");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn deleted_expense_is_gone() {
    let app = TestApp::spawn().await;
    let expense_id = seed_expense(&app, "قرطاسية", "إدارية", "2025-04-03").await;

    let response = app
        .client
        .delete(format!("{}/expenses/{}", app.api, expense_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 204);

    let response = app
        .client
        .get(format!("{}/expenses/{}", app.api, expense_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn csv_export_honors_filters_and_headers() {
    let app = TestApp::spawn().await;
    seed_expense(&app, "شراء أسمنت", "مواد بناء", "2025-03-05").await;
    seed_expense(&app, "نقل معدات", "نقل", "2025-03-20").await;

    let response = app
        .client
        .get(format!("{}/expenses/export?category=نقل", app.api))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(
        headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    assert_eq!(
        headers
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"expenses.csv\"")
    );

    let csv = response.text().await.expect("Failed to read body");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("\"التاريخ\",\"البيان\",\"التصنيف\",\"المبلغ\",\"المسؤول\"")
    );
    let row = lines.next().expect("one data row");
    assert!(row.contains("\"نقل معدات\""));
    assert!(row.contains("\"250.00\""));
    assert!(lines.next().is_none());

    app.cleanup().await;
}
