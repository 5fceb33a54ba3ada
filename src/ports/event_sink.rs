//! EventSink port - the outbound half of one subscriber channel.
//!
//! The realtime core only needs to push one serialized message to a
//! connection and learn whether that worked. Whether the bytes end up on a
//! Server-Sent Events stream, a WebSocket or a test buffer is the adapter's
//! business.
//!
//! ## Contract
//!
//! - `send` must not block. A message that cannot be accepted right away
//!   (queue full, peer gone) is reported as [`SinkClosed`].
//! - Messages accepted by one sink are delivered in the order they were sent.
//! - After returning `SinkClosed` once, a sink is never written again; the
//!   caller drops the connection.

use thiserror::Error;

/// The remote end can no longer accept messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Destination for serialized event payloads.
pub trait EventSink: Send + Sync {
    /// Hands one message to the transport without waiting.
    fn send(&self, payload: &str) -> Result<(), SinkClosed>;
}
