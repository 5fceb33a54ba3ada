//! Bounded queue sink feeding a transport task.
//!
//! The transport side (SSE stream or WebSocket writer) owns the receiver and
//! drains it at its own pace. The broadcaster side only ever calls
//! `try_send`, so a stalled client fills its own queue and gets dropped
//! instead of holding up everyone else.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::ports::{EventSink, SinkClosed};

/// [`EventSink`] backed by a bounded tokio mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    /// Creates a sink and the receiver the transport should drain.
    ///
    /// `capacity` is clamped to at least one so the connection
    /// acknowledgement always fits.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn send(&self, payload: &str) -> Result<(), SinkClosed> {
        match self.tx.try_send(payload.to_owned()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::debug!("Subscriber queue full, treating as disconnected");
                Err(SinkClosed)
            }
            Err(TrySendError::Closed(_)) => Err(SinkClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_in_order() {
        let (sink, mut rx) = ChannelSink::channel(4);
        sink.send("one").unwrap();
        sink.send("two").unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("one"));
        assert_eq!(rx.recv().await.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn full_queue_is_reported_as_closed() {
        let (sink, _rx) = ChannelSink::channel(1);
        sink.send("one").unwrap();
        assert_eq!(sink.send("two"), Err(SinkClosed));
    }

    #[tokio::test]
    async fn dropped_receiver_is_reported_as_closed() {
        let (sink, rx) = ChannelSink::channel(4);
        drop(rx);
        assert_eq!(sink.send("one"), Err(SinkClosed));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let (sink, _rx) = ChannelSink::channel(0);
        assert!(sink.send("ack").is_ok());
    }
}
