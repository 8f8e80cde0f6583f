//! `/ws/notify`: every connected client sees every message.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{OriginalUri, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};

use collabdocs_realtime::{ChannelConnection, Connection};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ws/notify", get(ws_upgrade))
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    ws.max_message_size(state.config.ws_max_message_bytes)
        .on_upgrade(move |socket| handle_connection(socket, path, state))
}

async fn handle_connection(socket: WebSocket, path: String, state: AppState) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (conn, mut outbound) =
        ChannelConnection::with_capacity(path, state.config.outbound_queue_capacity);

    let writer = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    state.hub.on_open(conn.clone());

    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                state.hub.on_message(&*conn, text.as_str());
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(?e, connection_id = %conn.id(), "ws read error");
                break;
            }
        }
    }

    conn.mark_closed();
    state.hub.on_close(&*conn);
    writer.abort();
}
