//! Realtime core: subscriber fan-out and seat locking.
//!
//! - `ConnectionRegistry` - Live subscribers and their sinks
//! - `SeatLockTable` - Time-bounded seat claims
//! - `EventBroadcaster` - Fan-out plus the only way to touch seat locks
//! - `ExpirySweeper` - Periodic removal of abandoned locks
//! - `RealtimeHub` - Startup and teardown of the above
//! - `ChannelSink` - Bounded queue feeding an SSE or WebSocket writer

mod broadcaster;
mod channel_sink;
mod guard;
mod hub;
mod lock_table;
mod registry;
mod sweeper;

pub use broadcaster::EventBroadcaster;
pub use channel_sink::ChannelSink;
pub use guard::ConnectionGuard;
pub use hub::RealtimeHub;
pub use lock_table::AcquireOutcome;
pub use sweeper::{ExpirySweeper, SweeperHandle};

#[cfg(test)]
pub(crate) use broadcaster::test_support;
