//! Process-wide hub: every message reaches every connection.

use std::sync::Arc;

use crate::connection::Connection;
use crate::fanout::{fan_out, BroadcastRule, FanoutReport};
use crate::registry::FlatRegistry;

/// Hub over one flat connection set. Inbound messages are echoed to all
/// connections including the sender, and `notify` lets in-process
/// producers push to everyone.
#[derive(Default)]
pub struct GlobalBroadcastHub {
    registry: FlatRegistry,
}

impl GlobalBroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hub holds `connection` until `on_close` is called for it.
    pub fn on_open(&self, connection: Arc<dyn Connection>) {
        let connection_id = connection.id().clone();
        let connections = self.registry.join(connection);
        tracing::info!(%connection_id, connections, "notification client connected");
    }

    /// Idempotent; returns whether the connection was registered.
    pub fn on_close(&self, connection: &dyn Connection) -> bool {
        let removed = self.registry.leave(connection.id());
        if removed {
            tracing::info!(connection_id = %connection.id(), "notification client disconnected");
        }
        removed
    }

    pub fn on_message(&self, connection: &dyn Connection, payload: &str) -> FanoutReport {
        let report = self.broadcast(payload);
        tracing::trace!(
            connection_id = %connection.id(),
            delivered = report.delivered,
            "echoed client message"
        );
        report
    }

    /// Push a server-originated notification to every open connection.
    pub fn notify(&self, payload: &str) -> FanoutReport {
        let report = self.broadcast(payload);
        tracing::debug!(
            delivered = report.delivered,
            failed = report.failed,
            "notification sent"
        );
        report
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    fn broadcast(&self, payload: &str) -> FanoutReport {
        let members = self.registry.snapshot();
        fan_out(&members, payload, &BroadcastRule::IncludeAll)
    }
}
