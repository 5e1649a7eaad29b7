//! Project management validation tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn create_project_rejects_blank_name() {
    let app = TestApp::new();

    let body = json!({
        "name": "  ",
        "domain": "example.com",
        "owner_name": "Dana",
        "owner_email": "dana@example.com",
    });

    let response = app
        .request("POST", "/api/v1/admin/projects", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn create_project_rejects_invalid_email() {
    let app = TestApp::new();

    let body = json!({
        "name": "Docs Site",
        "domain": "docs.example.com",
        "owner_name": "Dana",
        "owner_email": "not-an-email",
    });

    let response = app
        .request("POST", "/api/v1/admin/projects", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}
