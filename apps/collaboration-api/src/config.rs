/// Largest inbound WebSocket message accepted by default (1 MiB).
pub const DEFAULT_WS_MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Relayed edits buffered per socket before sends to it start failing.
pub const DEFAULT_OUTBOUND_QUEUE: usize = 256;

/// Collaboration API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Upper bound on a single inbound edit frame.
    pub ws_max_message_bytes: usize,
    /// Capacity of each socket's outbound queue.
    pub outbound_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables. Every variable is
    /// optional; unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            port: parsed_var("PORT").unwrap_or(4010),
            ws_max_message_bytes: parsed_var("WS_MAX_MESSAGE_BYTES")
                .unwrap_or(DEFAULT_WS_MAX_MESSAGE_BYTES),
            outbound_queue_capacity: parsed_var("WS_OUTBOUND_QUEUE")
                .unwrap_or(DEFAULT_OUTBOUND_QUEUE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4010,
            ws_max_message_bytes: DEFAULT_WS_MAX_MESSAGE_BYTES,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
