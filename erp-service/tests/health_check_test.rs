//! Health check integration tests for erp-service.

mod common;

use common::TestApp;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "erp-service");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn metrics_endpoint_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or("").contains("text/plain"))
        .unwrap_or(false));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("erp_db_query_duration_seconds"));

    app.cleanup().await;
}
