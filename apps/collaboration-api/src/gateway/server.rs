//! WebSocket upgrade handler and per-connection relay loop.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{OriginalUri, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use collabdocs_realtime::{ChannelConnection, Connection, GroupedBroadcastHub};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ws/collaborate/{document_id}", get(ws_upgrade))
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // The hub derives the document id from the path itself.
    let path = uri.path().to_string();
    ws.max_message_size(state.config.ws_max_message_bytes)
        .on_upgrade(move |socket| handle_connection(socket, path, state))
}

async fn handle_connection(socket: WebSocket, path: String, state: AppState) {
    let hub: Arc<GroupedBroadcastHub> = state.hub;
    let (ws_tx, mut ws_rx) = socket.split();
    let (conn, outbound) =
        ChannelConnection::with_capacity(path, state.config.outbound_queue_capacity);

    let writer = tokio::spawn(write_outbound(ws_tx, outbound));

    let document_id = hub.on_open(conn.clone());
    tracing::debug!(
        connection_id = %conn.id(),
        document_id = document_id.as_deref().unwrap_or_default(),
        "collaboration socket opened"
    );

    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                hub.on_message(&*conn, text.as_str());
            }
            Ok(Message::Close(_)) => break,
            // Binary frames are not part of the edit protocol; ping/pong is
            // answered by axum.
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(?e, connection_id = %conn.id(), "ws read error");
                break;
            }
        }
    }

    conn.mark_closed();
    hub.on_close(&*conn);
    writer.abort();

    tracing::debug!(connection_id = %conn.id(), "collaboration socket closed");
}

/// Drain the connection's queue into the socket until either side goes away.
async fn write_outbound(
    mut ws_tx: futures_util::stream::SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<String>,
) {
    while let Some(payload) = outbound.recv().await {
        if ws_tx.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }
    let _ = ws_tx.close().await;
}
