pub mod config;
pub mod gateway;
pub mod routes;

use std::sync::Arc;

use collabdocs_realtime::{GroupedBroadcastHub, PresenceQuery};
use config::Config;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub hub: Arc<GroupedBroadcastHub>,
    pub presence: PresenceQuery,
}

impl AppState {
    /// Wire a fresh document hub and its presence view.
    pub fn new(config: Config) -> Self {
        let hub = Arc::new(GroupedBroadcastHub::new());
        Self {
            config: Arc::new(config),
            presence: PresenceQuery::new(hub.clone()),
            hub,
        }
    }
}
