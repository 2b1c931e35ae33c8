//! Client company and material invoice integration tests.

mod common;

use common::{amount, dec, seed_client, seed_project, TestApp};
use serde_json::json;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn create_and_update_client() {
    let app = TestApp::spawn().await;

    let created = app
        .post(
            "/clients",
            json!({
                "name": "شركة التطوير العقاري",
                "contact_person": "م. سعيد",
                "phone": "0112223344"
            }),
            201,
        )
        .await;
    let id = created["id"].as_i64().expect("client id");

    let response = app
        .client
        .put(format!("{}/clients/{}", app.api, id))
        .json(&json!({ "contact_person": "م. بدر" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let client = app.get(&format!("/clients/{}", id)).await;
    assert_eq!(client["name"], "شركة التطوير العقاري");
    assert_eq!(client["contact_person"], "م. بدر");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn material_invoice_sums_items_and_links_project() {
    let app = TestApp::spawn().await;
    let client_id = seed_client(&app, "شركة المقاولات الكبرى").await;
    let project_id = seed_project(&app, "برج المكاتب").await;

    let body = app
        .post(
            "/material-invoices",
            json!({
                "client_id": client_id,
                "project_id": project_id,
                "invoice_number": "MAT-77",
                "invoice_date": "2025-06-01",
                "items": [
                    { "item_name": "بلاط", "quantity": "40", "unit_price": "35" },
                    { "item_name": "دهان", "quantity": "12", "unit_price": "80" }
                ]
            }),
            201,
        )
        .await;

    assert_eq!(amount(&body["total_amount"]), dec("2360"));
    assert_eq!(body["project_id"].as_i64(), Some(project_id));
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn material_invoice_for_unknown_client_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/material-invoices", app.api))
        .json(&json!({
            "client_id": 9999,
            "invoice_date": "2025-06-01",
            "total_amount": "100"
        }))
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
async fn list_material_invoices_filters_by_client_and_project() {
    let app = TestApp::spawn().await;
    let first_client = seed_client(&app, "العميل الأول").await;
    let second_client = seed_client(&app, "العميل الثاني").await;
    let project_id = seed_project(&app, "فيلا سكنية").await;

    app.post(
        "/material-invoices",
        json!({
            "client_id": first_client,
            "project_id": project_id,
            "invoice_date": "2025-06-01",
            "total_amount": "1500"
        }),
        201,
    )
    .await;
    app.post(
        "/material-invoices",
        json!({
            "client_id": second_client,
            "invoice_date": "2025-06-02",
            "total_amount": "900"
        }),
        201,
    )
    .await;

    let by_client = app
        .get(&format!("/material-invoices?client_id={}", first_client))
        .await;
    assert_eq!(by_client.as_array().map(Vec::len), Some(1));

    let by_project = app
        .get(&format!("/material-invoices?project_id={}", project_id))
        .await;
    assert_eq!(by_project.as_array().map(Vec::len), Some(1));
    assert_eq!(by_project[0]["client_id"].as_i64(), Some(first_client));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn material_invoice_deletes_with_its_items() {
    let app = TestApp::spawn().await;
    let client_id = seed_client(&app, "شركة المقاولات الكبرى").await;

    let created = app
        .post(
            "/material-invoices",
            json!({
                "client_id": client_id,
                "invoice_date": "2025-06-01",
                "items": [ { "item_name": "سيراميك", "quantity": "20", "unit_price": "45" } ]
            }),
            201,
        )
        .await;

    let response = app
        .client
        .delete(format!("{}/material-invoices/{}", app.api, created["id"]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 204);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn deleting_client_with_invoices_conflicts() {
    let app = TestApp::spawn().await;
    let client_id = seed_client(&app, "عميل مرتبط").await;

    app.post(
        "/material-invoices",
        json!({ "client_id": client_id, "invoice_date": "2025-06-01", "total_amount": "100" }),
        201,
    )
    .await;

    let response = app
        .client
        .delete(format!("{}/clients/{}", app.api, client_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 409);

    app.cleanup().await;
}
