//! Health endpoint tests.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/v1/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
