//! WebSocket upgrade handler for dashboard viewers.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};
use uuid::Uuid;

use beacon_core::error::AppError;

use crate::state::AppState;

/// GET /api/v1/admin/projects/{id}/ws — WebSocket upgrade
///
/// The project is verified before the upgrade; unknown projects get a
/// plain 404 instead of a dangling socket.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let project = state.project_service.get_project(id).await?;

    let max_frame = state.config.realtime.max_inbound_frame_bytes;
    Ok(ws
        .max_message_size(max_frame)
        .on_upgrade(move |socket| handle_viewer(state, project.id, socket)))
}

/// Drives one established viewer connection.
async fn handle_viewer(state: AppState, project_id: Uuid, socket: WebSocket) {
    let (conn_id, mut outbound_rx) = state
        .hub
        .subscribe(project_id, state.config.realtime.send_buffer_size);

    info!(
        conn_id = %conn_id,
        project_id = %project_id,
        "Viewer connection established"
    );

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Forward hub frames to the socket. When the hub drops the sender
    // (slow-consumer eviction), the loop ends and the socket is closed.
    let write_loop = async {
        while let Some(text) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    };

    // Viewers are read-only; inbound payloads are drained for liveness
    // and discarded.
    let read_loop = async {
        while let Some(result) = ws_rx.next().await {
            match result {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(conn_id = %conn_id, error = %e, "Viewer socket error");
                    break;
                }
            }
        }
    };

    // Either side finishing tears the whole connection down; a peer that
    // never answers the close frame cannot keep the task parked.
    tokio::select! {
        _ = write_loop => {}
        _ = read_loop => {}
    }

    state.hub.unregister(conn_id);

    info!(
        conn_id = %conn_id,
        project_id = %project_id,
        "Viewer connection closed"
    );
}
