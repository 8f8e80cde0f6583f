use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::connection::{Connection, SendError};
use crate::id::ConnectionId;

/// In-memory connection that records every payload it is sent.
pub struct RecordingConnection {
    id: ConnectionId,
    path: String,
    open: AtomicBool,
    fail_sends: AtomicBool,
    received: Mutex<Vec<String>>,
}

impl RecordingConnection {
    pub fn new(id: &str, path: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::from(id),
            path: path.to_string(),
            open: AtomicBool::new(true),
            fail_sends: AtomicBool::new(false),
            received: Mutex::new(Vec::new()),
        })
    }

    /// Shorthand for a connection on `/ws/collaborate/{document_id}`.
    pub fn on_document(id: &str, document_id: &str) -> Arc<Self> {
        Self::new(id, &format!("/ws/collaborate/{document_id}"))
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Stay open but make the transport reject every send.
    pub fn break_transport(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().clone()
    }
}

impl Connection for RecordingConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn send(&self, payload: &str) -> Result<(), SendError> {
        if !self.is_open() {
            return Err(SendError::Closed);
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(SendError::Transport("broken pipe".to_string()));
        }
        self.received.lock().push(payload.to_string());
        Ok(())
    }
}
