//! The handle a hub holds for each live client channel.

use std::fmt;

use crate::id::ConnectionId;

/// Why a single send did not reach its peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The peer has already gone away.
    Closed,
    /// The transport refused the frame.
    Transport(String),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Closed => f.write_str("connection closed"),
            SendError::Transport(reason) => write!(f, "transport error: {reason}"),
        }
    }
}

impl std::error::Error for SendError {}

/// A bidirectional text channel owned by the transport layer.
///
/// Hubs keep a strong `Arc` to every registered connection and only drop it
/// in `on_close`. A transport that forgets to call `on_close` leaks the
/// handle, and the hub keeps counting it until the process exits; an
/// `is_open` of `false` only stops delivery, not membership.
pub trait Connection: Send + Sync {
    fn id(&self) -> &ConnectionId;

    /// Request path the client used to open the channel.
    fn path(&self) -> &str;

    fn is_open(&self) -> bool;

    /// Push a text payload to the remote end. Must not block.
    fn send(&self, payload: &str) -> Result<(), SendError>;
}
