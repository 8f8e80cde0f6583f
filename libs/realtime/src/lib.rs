//! Connection registries and fan-out hubs shared by the collaboration and
//! notification services.

pub mod channel;
pub mod connection;
pub mod fanout;
pub mod global;
pub mod grouped;
pub mod id;
pub mod path;
pub mod presence;
pub mod registry;

pub use channel::ChannelConnection;
pub use connection::{Connection, SendError};
pub use fanout::{BroadcastRule, FanoutReport};
pub use global::GlobalBroadcastHub;
pub use grouped::GroupedBroadcastHub;
pub use id::ConnectionId;
pub use presence::PresenceQuery;

#[cfg(test)]
pub(crate) mod testing;
