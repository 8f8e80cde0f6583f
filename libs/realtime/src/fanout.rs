//! Sending one payload to many connections.

use std::sync::Arc;

use serde::Serialize;

use crate::connection::Connection;
use crate::id::ConnectionId;

/// Who in a member list receives a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastRule {
    /// Every member except the originating connection (peer relay).
    ExcludeSender(ConnectionId),
    /// Every member, the originator included (echo / notify).
    IncludeAll,
}

impl BroadcastRule {
    fn admits(&self, id: &ConnectionId) -> bool {
        match self {
            BroadcastRule::ExcludeSender(sender) => id != sender,
            BroadcastRule::IncludeAll => true,
        }
    }
}

/// Outcome of one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FanoutReport {
    pub delivered: usize,
    /// Recipients that were already closed.
    pub skipped: usize,
    /// Recipients whose send returned an error.
    pub failed: usize,
}

/// Send `payload` to every member admitted by `rule`.
///
/// A closed or failing peer never stops delivery to the rest.
pub fn fan_out(
    members: &[Arc<dyn Connection>],
    payload: &str,
    rule: &BroadcastRule,
) -> FanoutReport {
    let mut report = FanoutReport::default();

    for conn in members.iter().filter(|m| rule.admits(m.id())) {
        if !conn.is_open() {
            report.skipped += 1;
            continue;
        }
        match conn.send(payload) {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                tracing::debug!(connection_id = %conn.id(), %err, "dropping payload for peer");
                report.failed += 1;
            }
        }
    }

    report
}
