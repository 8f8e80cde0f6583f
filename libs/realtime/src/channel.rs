//! A `Connection` backed by a bounded mpsc queue.
//!
//! The transport task owns the receiving half and drains it into the socket,
//! so hubs can fan out without awaiting socket I/O. The queue is bounded: a
//! peer that stops reading fills it, and further sends to that peer fail
//! instead of growing memory without limit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::connection::{Connection, SendError};
use crate::id::ConnectionId;

/// Payloads buffered per connection before sends start failing.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

pub struct ChannelConnection {
    id: ConnectionId,
    path: String,
    open: AtomicBool,
    outbound: mpsc::Sender<String>,
}

impl ChannelConnection {
    /// Create a handle with a fresh id and the default queue capacity. The
    /// returned receiver yields every payload sent through the handle, in
    /// order.
    pub fn new(path: impl Into<String>) -> (Arc<Self>, mpsc::Receiver<String>) {
        Self::with_capacity(path, DEFAULT_OUTBOUND_CAPACITY)
    }

    pub fn with_capacity(
        path: impl Into<String>,
        capacity: usize,
    ) -> (Arc<Self>, mpsc::Receiver<String>) {
        Self::build(ConnectionId::generate(), path.into(), capacity)
    }

    pub fn with_id(
        id: ConnectionId,
        path: impl Into<String>,
    ) -> (Arc<Self>, mpsc::Receiver<String>) {
        Self::build(id, path.into(), DEFAULT_OUTBOUND_CAPACITY)
    }

    fn build(
        id: ConnectionId,
        path: String,
        capacity: usize,
    ) -> (Arc<Self>, mpsc::Receiver<String>) {
        // tokio panics on a zero-capacity channel
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        let conn = Arc::new(Self {
            id,
            path,
            open: AtomicBool::new(true),
            outbound,
        });
        (conn, rx)
    }

    /// Flag the handle as closed. Later sends fail with `SendError::Closed`.
    pub fn mark_closed(&self) {
        self.open.store(false, Ordering::Release);
    }
}

impl Connection for ChannelConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire) && !self.outbound.is_closed()
    }

    fn send(&self, payload: &str) -> Result<(), SendError> {
        if !self.open.load(Ordering::Acquire) {
            return Err(SendError::Closed);
        }
        self.outbound
            .try_send(payload.to_string())
            .map_err(|err| match err {
                TrySendError::Full(_) => SendError::Transport("outbound queue full".into()),
                TrySendError::Closed(_) => SendError::Closed,
            })
    }
}
