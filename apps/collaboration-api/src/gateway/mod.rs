//! WebSocket transport for the document hub.

pub mod server;
