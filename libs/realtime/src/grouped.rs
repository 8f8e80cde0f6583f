//! Per-document hub: relays each message to the sender's co-editors.

use std::sync::Arc;

use crate::connection::Connection;
use crate::fanout::{fan_out, BroadcastRule, FanoutReport};
use crate::id::ConnectionId;
use crate::path::group_key_from_path;
use crate::registry::GroupRegistry;

/// Hub that partitions connections by the document id at the end of their
/// path and relays messages within a document, never back to the sender.
///
/// Construct once at startup and share behind an `Arc`.
#[derive(Default)]
pub struct GroupedBroadcastHub {
    registry: GroupRegistry,
}

impl GroupedBroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly opened connection under the document id taken from
    /// its path. Returns the group key, or `None` if the path has no
    /// segment, in which case the connection stays unregistered.
    ///
    /// The hub keeps its clone of `connection` until `on_close` is called
    /// for it.
    pub fn on_open(&self, connection: Arc<dyn Connection>) -> Option<String> {
        let Some(key) = group_key_from_path(connection.path()) else {
            tracing::warn!(
                connection_id = %connection.id(),
                path = connection.path(),
                "no document id in connection path, not registering"
            );
            return None;
        };

        let key = key.into_owned();
        let members = self.registry.join(&key, Arc::clone(&connection));
        tracing::info!(
            connection_id = %connection.id(),
            document_id = %key,
            members,
            "collaborator joined"
        );
        Some(key)
    }

    /// Relay `payload` to every other open connection in the sender's group.
    pub fn on_message(&self, connection: &dyn Connection, payload: &str) -> FanoutReport {
        let Some(key) = group_key_from_path(connection.path()) else {
            return FanoutReport::default();
        };
        let Some(members) = self.registry.snapshot(&key) else {
            return FanoutReport::default();
        };

        let report = fan_out(
            &members,
            payload,
            &BroadcastRule::ExcludeSender(connection.id().clone()),
        );
        tracing::trace!(
            connection_id = %connection.id(),
            document_id = %key,
            delivered = report.delivered,
            failed = report.failed,
            "relayed edit"
        );
        report
    }

    /// Remove a connection from its group, dropping the group once empty.
    /// Safe to call twice or without a prior `on_open`.
    pub fn on_close(&self, connection: &dyn Connection) -> bool {
        let Some(key) = group_key_from_path(connection.path()) else {
            return false;
        };

        let outcome = self.registry.leave(&key, connection.id());
        if outcome.removed {
            tracing::info!(
                connection_id = %connection.id(),
                document_id = %key,
                group_dropped = outcome.group_dropped,
                "collaborator left"
            );
        }
        outcome.removed
    }

    /// Number of live connections on a document; 0 for unknown documents.
    pub fn active_count(&self, group_key: &str) -> usize {
        self.registry.count(group_key)
    }

    pub fn connection_ids(&self, group_key: &str) -> Vec<ConnectionId> {
        self.registry.member_ids(group_key)
    }

    /// Number of documents with at least one live connection.
    pub fn group_count(&self) -> usize {
        self.registry.group_count()
    }
}
