//! Supplier invoice integration tests: item totals and deletion guards.

mod common;

use common::{amount, dec, seed_supplier, TestApp};
use serde_json::json;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn invoice_total_is_summed_from_items() {
    let app = TestApp::spawn().await;
    let supplier_id = seed_supplier(&app, "مؤسسة البناء").await;

    let body = app
        .post(
            "/supplier-invoices",
            json!({
                "supplier_id": supplier_id,
                "invoice_number": "INV-100",
                "invoice_date": "2025-06-01",
                "items": [
                    { "item_name": "أسمنت", "quantity": "10", "unit_price": "25.50" },
                    { "item_name": "رمل", "quantity": "2", "unit_price": "100" }
                ]
            }),
            201,
        )
        .await;

    assert_eq!(amount(&body["total_amount"]), dec("455"));
    assert_eq!(amount(&body["paid_amount"]), dec("0"));
    assert_eq!(body["status"], "pending");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn declared_total_must_match_item_sum() {
    let app = TestApp::spawn().await;
    let supplier_id = seed_supplier(&app, "مؤسسة البناء").await;

    let response = app
        .client
        .post(format!("{}/supplier-invoices", app.api))
        .json(&json!({
            "supplier_id": supplier_id,
            "invoice_date": "2025-06-01",
            "total_amount": "999",
            "items": [
                { "item_name": "أسمنت", "quantity": "10", "unit_price": "25.50" }
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "إجمالي الفاتورة لا يطابق مجموع الأصناف");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn invoice_without_total_or_items_is_rejected() {
    let app = TestApp::spawn().await;
    let supplier_id = seed_supplier(&app, "مؤسسة البناء").await;

    let response = app
        .client
        .post(format!("{}/supplier-invoices", app.api))
        .json(&json!({ "supplier_id": supplier_id, "invoice_date": "2025-06-01" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "إجمالي الفاتورة مطلوب عند عدم إدخال أصناف");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn invoice_for_unknown_supplier_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/supplier-invoices", app.api))
        .json(&json!({
            "supplier_id": 9999,
            "invoice_date": "2025-06-01",
            "total_amount": "100"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "المورد غير موجود");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn get_invoice_returns_items() {
    let app = TestApp::spawn().await;
    let supplier_id = seed_supplier(&app, "مؤسسة البناء").await;

    let created = app
        .post(
            "/supplier-invoices",
            json!({
                "supplier_id": supplier_id,
                "invoice_date": "2025-06-01",
                "items": [
                    { "item_name": "حديد تسليح", "quantity": "3", "unit_price": "2400" }
                ]
            }),
            201,
        )
        .await;

    let invoice = app
        .get(&format!("/supplier-invoices/{}", created["id"]))
        .await;
    assert_eq!(amount(&invoice["total_amount"]), dec("7200"));
    let items = invoice["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_name"], "حديد تسليح");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn list_invoices_filters_by_supplier_and_status() {
    let app = TestApp::spawn().await;
    let first = seed_supplier(&app, "المورد الأول").await;
    let second = seed_supplier(&app, "المورد الثاني").await;

    let invoice = app
        .post(
            "/supplier-invoices",
            json!({ "supplier_id": first, "invoice_date": "2025-06-01", "total_amount": "1000" }),
            201,
        )
        .await;
    app.post(
        "/supplier-invoices",
        json!({ "supplier_id": second, "invoice_date": "2025-06-02", "total_amount": "800" }),
        201,
    )
    .await;

    // Settle the first invoice so the statuses differ.
    app.post(
        "/supplier-payments",
        json!({
            "supplier_id": first,
            "invoice_id": invoice["id"],
            "amount": "1000",
            "payment_date": "2025-06-03"
        }),
        201,
    )
    .await;

    let for_first = app
        .get(&format!("/supplier-invoices?supplier_id={}", first))
        .await;
    assert_eq!(for_first.as_array().map(Vec::len), Some(1));

    let paid = app.get("/supplier-invoices?status=paid").await;
    assert_eq!(paid.as_array().map(Vec::len), Some(1));
    assert_eq!(paid[0]["supplier_id"].as_i64(), Some(first));

    let pending = app.get("/supplier-invoices?status=pending").await;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));
    assert_eq!(pending[0]["supplier_id"].as_i64(), Some(second));

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn unpaid_invoice_can_be_deleted_with_its_items() {
    let app = TestApp::spawn().await;
    let supplier_id = seed_supplier(&app, "مؤسسة البناء").await;

    let created = app
        .post(
            "/supplier-invoices",
            json!({
                "supplier_id": supplier_id,
                "invoice_date": "2025-06-01",
                "items": [
                    { "item_name": "أسمنت", "quantity": "5", "unit_price": "26" }
                ]
            }),
            201,
        )
        .await;

    let response = app
        .client
        .delete(format!("{}/supplier-invoices/{}", app.api, created["id"]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 204);

    let missing = app
        .client
        .get(format!("{}/supplier-invoices/{}", app.api, created["id"]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn invoice_with_payments_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    let supplier_id = seed_supplier(&app, "مؤسسة البناء").await;

    let created = app
        .post(
            "/supplier-invoices",
            json!({ "supplier_id": supplier_id, "invoice_date": "2025-06-01", "total_amount": "1000" }),
            201,
        )
        .await;
    app.post(
        "/supplier-payments",
        json!({
            "supplier_id": supplier_id,
            "invoice_id": created["id"],
            "amount": "200",
            "payment_date": "2025-06-05"
        }),
        201,
    )
    .await;

    let response = app
        .client
        .delete(format!("{}/supplier-invoices/{}", app.api, created["id"]))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 409);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "لا يمكن حذف فاتورة مسجل عليها دفعات");

    app.cleanup().await;
}
