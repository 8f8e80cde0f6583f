#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use collaboration_api::config::Config;
use collaboration_api::AppState;

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build a test AppState with default configuration and an empty hub.
pub fn test_state() -> AppState {
    AppState::new(Config::default())
}

/// Build the full application router wired to a fresh test state.
pub fn test_app() -> (Router, AppState) {
    let state = test_state();
    let app = collaboration_api::routes::router().with_state(state.clone());
    (app, state)
}

/// Start an actual TCP server for WebSocket testing.
/// The server runs in the background for the rest of the test.
pub async fn start_ws_server() -> (SocketAddr, AppState) {
    let (app, state) = test_app();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

/// Open a collaboration socket on a document and wait until the hub has
/// registered it (the upgrade completes before the server-side handler runs).
pub async fn join_document(addr: SocketAddr, state: &AppState, document_id: &str) -> Client {
    join_as(addr, state, document_id, document_id).await
}

/// Like `join_document`, but the URL carries `segment` verbatim (for example
/// percent-encoded) while the hub is expected to count it under `document_id`.
pub async fn join_as(
    addr: SocketAddr,
    state: &AppState,
    segment: &str,
    document_id: &str,
) -> Client {
    let before = state.hub.active_count(document_id);
    let url = format!("ws://{addr}/ws/collaborate/{segment}");
    let (ws, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("ws connect");
    wait_for_count(state, document_id, before + 1).await;
    ws
}

/// Poll the hub until `document_id` has exactly `expected` live connections.
pub async fn wait_for_count(state: &AppState, document_id: &str, expected: usize) {
    time::timeout(Duration::from_secs(5), async {
        while state.hub.active_count(document_id) != expected {
            time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| {
        panic!(
            "timed out waiting for {document_id} to reach {expected} connections (at {})",
            state.hub.active_count(document_id)
        )
    });
}

pub async fn send_text(ws: &mut Client, text: &str) {
    ws.send(tungstenite::Message::Text(text.to_string().into()))
        .await
        .expect("send text");
}

/// Read the next text frame, failing the test after 5 seconds.
pub async fn recv_text(ws: &mut Client) -> String {
    loop {
        let msg = time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timeout waiting for message")
            .expect("stream ended")
            .expect("ws read error");
        match msg {
            tungstenite::Message::Text(text) => return text.to_string(),
            tungstenite::Message::Ping(_) | tungstenite::Message::Pong(_) => continue,
            other => panic!("Expected text frame, got: {other:?}"),
        }
    }
}

/// Assert that no text frame arrives within a short window.
pub async fn expect_silence(ws: &mut Client) {
    if let Ok(Some(Ok(tungstenite::Message::Text(text)))) =
        time::timeout(Duration::from_millis(250), ws.next()).await
    {
        panic!("Expected no message, got: {text}");
    }
}

pub async fn close(mut ws: Client) {
    ws.close(None).await.expect("close");
}
