//! Read-only presence view over the document hub.

use std::sync::Arc;

use crate::grouped::GroupedBroadcastHub;
use crate::id::ConnectionId;

/// Reports how many connections are live on a document.
#[derive(Clone)]
pub struct PresenceQuery {
    hub: Arc<GroupedBroadcastHub>,
}

impl PresenceQuery {
    pub fn new(hub: Arc<GroupedBroadcastHub>) -> Self {
        Self { hub }
    }

    /// 0 for documents nobody has open.
    pub fn active_count(&self, document_id: &str) -> usize {
        self.hub.active_count(document_id)
    }

    pub fn active_connection_ids(&self, document_id: &str) -> Vec<ConnectionId> {
        let mut ids = self.hub.connection_ids(document_id);
        ids.sort();
        ids
    }
}
