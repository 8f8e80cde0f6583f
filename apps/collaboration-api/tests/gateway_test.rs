//! End-to-end relay tests over real WebSocket connections.

mod common;

use common::{
    close, expect_silence, join_as, join_document, recv_text, send_text, wait_for_count,
};

#[tokio::test]
async fn edits_reach_co_editors_but_not_sender() {
    let (addr, state) = common::start_ws_server().await;

    let mut a = join_document(addr, &state, "doc1").await;
    let mut b = join_document(addr, &state, "doc1").await;
    let mut c = join_document(addr, &state, "doc1").await;

    send_text(&mut a, "hello").await;
    assert_eq!(recv_text(&mut b).await, "hello");
    assert_eq!(recv_text(&mut c).await, "hello");
    expect_silence(&mut a).await;

    close(b).await;
    wait_for_count(&state, "doc1", 2).await;

    send_text(&mut c, "world").await;
    assert_eq!(recv_text(&mut a).await, "world");
    expect_silence(&mut c).await;

    close(a).await;
    wait_for_count(&state, "doc1", 1).await;

    close(c).await;
    wait_for_count(&state, "doc1", 0).await;
    assert_eq!(state.hub.group_count(), 0);
}

#[tokio::test]
async fn documents_are_isolated() {
    let (addr, state) = common::start_ws_server().await;

    let mut a = join_document(addr, &state, "alpha").await;
    let mut b = join_document(addr, &state, "alpha").await;
    let mut outsider = join_document(addr, &state, "beta").await;

    send_text(&mut a, "alpha-only").await;
    assert_eq!(recv_text(&mut b).await, "alpha-only");
    expect_silence(&mut outsider).await;

    send_text(&mut outsider, "beta-only").await;
    expect_silence(&mut a).await;
    expect_silence(&mut b).await;
}

#[tokio::test]
async fn presence_endpoint_follows_socket_lifecycle() {
    let (addr, state) = common::start_ws_server().await;
    assert_eq!(active_count(addr, "live").await, 0);

    let a = join_document(addr, &state, "live").await;
    let b = join_document(addr, &state, "live").await;
    assert_eq!(active_count(addr, "live").await, 2);

    close(a).await;
    wait_for_count(&state, "live", 1).await;
    assert_eq!(active_count(addr, "live").await, 1);

    close(b).await;
    wait_for_count(&state, "live", 0).await;
    assert_eq!(active_count(addr, "live").await, 0);
}

#[tokio::test]
async fn abrupt_disconnect_is_deregistered() {
    let (addr, state) = common::start_ws_server().await;

    let mut a = join_document(addr, &state, "doc-drop").await;
    let b = join_document(addr, &state, "doc-drop").await;

    // Dropping the client without a close handshake tears down the TCP stream.
    drop(b);
    wait_for_count(&state, "doc-drop", 1).await;

    send_text(&mut a, "still here").await;
    expect_silence(&mut a).await;
}

#[tokio::test]
async fn encoded_document_id_matches_presence_route() {
    let (addr, state) = common::start_ws_server().await;

    let mut a = join_as(addr, &state, "my%20doc", "my doc").await;
    let mut b = join_as(addr, &state, "my%20doc", "my doc").await;

    // The HTTP route decodes the same segment, so both sides agree.
    assert_eq!(active_count(addr, "my%20doc").await, 2);
    assert_eq!(state.hub.active_count("my%20doc"), 0);

    send_text(&mut a, "spaced").await;
    assert_eq!(recv_text(&mut b).await, "spaced");
    expect_silence(&mut a).await;

    close(a).await;
    close(b).await;
    wait_for_count(&state, "my doc", 0).await;
    assert_eq!(active_count(addr, "my%20doc").await, 0);
}

/// GET a presence count over real HTTP.
async fn active_count(addr: std::net::SocketAddr, document_id: &str) -> usize {
    reqwest::get(format!("http://{addr}/collaboration/active/{document_id}"))
        .await
        .expect("presence request")
        .json()
        .await
        .expect("parse presence count")
}
