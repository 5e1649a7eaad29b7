//! Tracking endpoint credential-gate tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn track_body() -> serde_json::Value {
    json!({
        "session_id": "sess-1",
        "event_type": "pageview",
        "event_name": "page_view",
        "page_url": "https://example.com/",
    })
}

#[tokio::test]
async fn track_without_api_key_is_unauthenticated() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/track", Some(track_body()), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
    assert_eq!(response.body["message"], "API key is required");
}

#[tokio::test]
async fn blank_header_falls_through_to_unauthenticated() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/track", Some(track_body()), Some(""))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}
