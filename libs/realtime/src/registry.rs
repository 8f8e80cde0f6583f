//! Connection registries: one keyed by group, one flat.
//!
//! Membership is copy-on-write. A broadcast takes a `Snapshot` and iterates
//! it with no lock held, while joins and leaves publish a new member list.
//! The group map is a `DashMap`, so unrelated groups only contend when they
//! hash to the same shard.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::connection::Connection;
use crate::id::ConnectionId;

/// Immutable view of a member list at one point in time.
pub type Snapshot = Arc<Vec<Arc<dyn Connection>>>;

/// Copy-on-write set of connections keyed by `ConnectionId`.
#[derive(Clone, Default)]
pub struct MemberSet {
    members: Snapshot,
}

impl MemberSet {
    /// Add a connection. A connection with the same id is replaced.
    pub fn insert(&mut self, conn: Arc<dyn Connection>) {
        let members = Arc::make_mut(&mut self.members);
        match members.iter().position(|m| m.id() == conn.id()) {
            Some(idx) => members[idx] = conn,
            None => members.push(conn),
        }
    }

    /// Returns `true` if the connection was a member.
    pub fn remove(&mut self, id: &ConnectionId) -> bool {
        if !self.contains(id) {
            return false;
        }
        Arc::make_mut(&mut self.members).retain(|m| m.id() != id);
        true
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.members.iter().any(|m| m.id() == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.members)
    }

    pub fn ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.id().clone()).collect()
    }
}

/// Result of removing a connection from a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// The connection was registered under the key.
    pub removed: bool,
    /// The group became empty and was dropped from the registry.
    pub group_dropped: bool,
}

/// Groups of connections keyed by document id.
///
/// A group exists only while it has members: it is created by the first
/// `join` and dropped by the `leave` that empties it, both under the same
/// shard lock so a concurrent join cannot land in a dropped group.
#[derive(Default)]
pub struct GroupRegistry {
    groups: DashMap<String, MemberSet>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a group, creating the group if needed.
    /// Returns the group's size after the join.
    pub fn join(&self, key: &str, conn: Arc<dyn Connection>) -> usize {
        let mut group = self.groups.entry(key.to_string()).or_default();
        group.insert(conn);
        group.len()
    }

    pub fn leave(&self, key: &str, id: &ConnectionId) -> LeaveOutcome {
        let mut removed = false;
        let dropped = self
            .groups
            .remove_if_mut(key, |_, members| {
                removed = members.remove(id);
                members.is_empty()
            })
            .is_some();

        LeaveOutcome {
            removed,
            group_dropped: dropped,
        }
    }

    pub fn snapshot(&self, key: &str) -> Option<Snapshot> {
        self.groups.get(key).map(|group| group.snapshot())
    }

    pub fn count(&self, key: &str) -> usize {
        self.groups.get(key).map(|group| group.len()).unwrap_or(0)
    }

    pub fn member_ids(&self, key: &str) -> Vec<ConnectionId> {
        self.groups
            .get(key)
            .map(|group| group.ids())
            .unwrap_or_default()
    }

    pub fn contains_group(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// A single set covering every connection.
#[derive(Default)]
pub struct FlatRegistry {
    members: RwLock<MemberSet>,
}

impl FlatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, conn: Arc<dyn Connection>) -> usize {
        let mut members = self.members.write();
        members.insert(conn);
        members.len()
    }

    pub fn leave(&self, id: &ConnectionId) -> bool {
        self.members.write().remove(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.members.read().snapshot()
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }
}
