pub mod config;
pub mod error;
pub mod gateway;
pub mod routes;

use std::sync::Arc;

use collabdocs_realtime::GlobalBroadcastHub;
use config::Config;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Process-wide notification hub. In-process producers hold a clone of
    /// this handle and call `notify` on it.
    pub hub: Arc<GlobalBroadcastHub>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            hub: Arc::new(GlobalBroadcastHub::new()),
        }
    }
}
