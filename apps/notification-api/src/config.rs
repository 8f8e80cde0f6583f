/// Notification API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Upper bound on a single inbound WebSocket message.
    pub ws_max_message_bytes: usize,
    /// Upper bound on a notification submitted over HTTP.
    pub max_notification_bytes: usize,
    /// Capacity of each socket's outbound queue; a client that stops
    /// reading misses notifications once it fills.
    pub outbound_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables. Nothing is required.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            ws_max_message_bytes: std::env::var("WS_MAX_MESSAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ws_max_message_bytes),
            max_notification_bytes: std::env::var("MAX_NOTIFICATION_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_notification_bytes),
            outbound_queue_capacity: std::env::var("WS_OUTBOUND_QUEUE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.outbound_queue_capacity),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4011,
            ws_max_message_bytes: 1024 * 1024,
            max_notification_bytes: 64 * 1024,
            outbound_queue_capacity: 256,
        }
    }
}
