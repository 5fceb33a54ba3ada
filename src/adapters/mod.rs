//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `realtime` - Subscriber fan-out, seat locks, expiry sweeper
//! - `memory` - In-memory airline store
//! - `clock` - System and manual clocks
//! - `http` - REST endpoints and the SSE stream
//! - `websocket` - WebSocket transport

pub mod clock;
pub mod http;
pub mod memory;
pub mod realtime;
pub mod websocket;

pub use clock::{ManualClock, SystemClock};
pub use memory::InMemoryAirlineStore;
pub use realtime::{EventBroadcaster, RealtimeHub};
