#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use notification_api::config::Config;
use notification_api::AppState;

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build the full application router wired to a fresh test state.
pub fn test_app() -> (Router, AppState) {
    let state = AppState::new(Config::default());
    let app = notification_api::routes::router().with_state(state.clone());
    (app, state)
}

/// Start an actual TCP server for WebSocket testing.
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

/// Connect to `/ws/notify` and wait for the hub to register the client.
pub async fn connect(addr: SocketAddr, state: &AppState) -> Client {
    let before = state.hub.connection_count();
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/notify"))
        .await
        .expect("ws connect");
    wait_for_connections(state, before + 1).await;
    ws
}

pub async fn wait_for_connections(state: &AppState, expected: usize) {
    time::timeout(Duration::from_secs(5), async {
        while state.hub.connection_count() != expected {
            time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("timed out waiting for hub connection count");
}

pub async fn send_text(ws: &mut Client, text: &str) {
    ws.send(tungstenite::Message::Text(text.to_string().into()))
        .await
        .expect("send text");
}

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
