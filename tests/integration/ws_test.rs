//! Viewer connection tests against a live server.
//!
//! These need PostgreSQL; run with DATABASE_URL set and `-- --ignored`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::StreamExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_tungstenite::connect_async;
use uuid::Uuid;

use beacon_api::AppState;
use beacon_core::config::AppConfig;
use beacon_database::DatabasePool;
use beacon_database::repositories::ProjectRepository;
use beacon_entity::event::Event;
use beacon_entity::project::CreateProject;
use beacon_realtime::{Hub, HubHandle};

struct TestServer {
    addr: SocketAddr,
    hub: HubHandle,
    project_id: Uuid,
}

impl TestServer {
    fn ws_url(&self) -> String {
        format!(
            "ws://{}/api/v1/admin/projects/{}/ws",
            self.addr, self.project_id
        )
    }
}

/// Start the real server on an ephemeral port, with one project to watch.
async fn start_server(send_buffer_size: usize) -> TestServer {
    let mut config: AppConfig = serde_json::from_str("{}").expect("default config");
    config.database.url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
    config.realtime.send_buffer_size = send_buffer_size;

    let db = DatabasePool::connect(&config.database)
        .await
        .expect("connect to test database");
    beacon_database::migration::run_migrations(db.pool())
        .await
        .expect("run migrations");

    let project = ProjectRepository::new(db.pool().clone())
        .create(&CreateProject {
            name: "Viewer Test".to_string(),
            domain: "viewer.example.com".to_string(),
            description: None,
            owner_name: "Owner".to_string(),
            owner_email: "owner@example.com".to_string(),
            api_key: format!("ak_{}", &Uuid::new_v4().simple().to_string()[..16]),
        })
        .await
        .expect("create project");

    let hub = Hub::spawn();
    let state = AppState::new(Arc::new(config), db.pool().clone(), hub.clone());
    let app = beacon_api::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve");
    });

    TestServer {
        addr,
        hub,
        project_id: project.id,
    }
}

fn tracked_event(project_id: Uuid, event_name: &str) -> Event {
    Event {
        id: Uuid::new_v4(),
        project_id: Some(project_id),
        session_id: "sess-1".to_string(),
        user_id: None,
        event_type: "page_view".to_string(),
        event_name: event_name.to_string(),
        properties: "{}".to_string(),
        page_url: Some("https://viewer.example.com/".to_string()),
        page_title: None,
        referrer: None,
        user_agent: None,
        ip_address: "203.0.113.9".to_string(),
        country: None,
        city: None,
        screen_width: None,
        screen_height: None,
        language: None,
        platform: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn wait_for_count(hub: &HubHandle, expected: usize) {
    for _ in 0..50 {
        if hub.connection_count().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("hub never reached {expected} registered viewers");
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn viewer_receives_published_events() {
    let server = start_server(8).await;
    let (mut socket, _) = connect_async(server.ws_url()).await.expect("ws connect");
    wait_for_count(&server.hub, 1).await;

    server
        .hub
        .publish(tracked_event(server.project_id, "signup"));

    let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("frame within timeout")
        .expect("stream open")
        .expect("read frame");
    let json: serde_json::Value =
        serde_json::from_str(frame.to_text().expect("text frame")).expect("json frame");
    assert_eq!(json["type"], "new_event");
    assert_eq!(json["project_id"], server.project_id.to_string());
    assert_eq!(json["event"]["event_name"], "signup");
}

/// Perform a bare WebSocket upgrade over TCP, so the test fully controls
/// what the peer sends back (nothing).
async fn raw_ws_connect(server: &TestServer) -> TcpStream {
    let mut stream = TcpStream::connect(server.addr).await.expect("tcp connect");
    let request = format!(
        "GET /api/v1/admin/projects/{}/ws HTTP/1.1\r\n\
         Host: {}\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
         Sec-WebSocket-Version: 13\r\n\r\n",
        server.project_id, server.addr
    );
    stream
        .write_all(request.as_bytes())
        .await
        .expect("handshake write");

    let mut buf = [0u8; 1024];
    let n = stream.read(&mut buf).await.expect("handshake read");
    let response = String::from_utf8_lossy(&buf[..n]);
    assert!(
        response.starts_with("HTTP/1.1 101"),
        "unexpected upgrade response: {response}"
    );
    stream
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn evicted_viewer_socket_is_closed_without_peer_cooperation() {
    let server = start_server(1).await;

    // A peer that answers nothing, not even the close frame.
    let mut stream = raw_ws_connect(&server).await;
    wait_for_count(&server.hub, 1).await;

    // Buffer of one: the second publish overflows and evicts the viewer.
    server
        .hub
        .publish(tracked_event(server.project_id, "fills-buffer"));
    server
        .hub
        .publish(tracked_event(server.project_id, "overflows"));

    // The server must send its remaining frames plus a close frame and then
    // drop the socket on its own; the peer's silence may not park the
    // connection task forever.
    let reached_eof = tokio::time::timeout(Duration::from_secs(5), async {
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
    })
    .await;
    assert!(
        reached_eof.is_ok(),
        "server kept the connection open after evicting the viewer"
    );
}
