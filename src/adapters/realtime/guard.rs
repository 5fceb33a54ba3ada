//! Ties a registration to the lifetime of a transport task.

use std::sync::Arc;

use crate::domain::foundation::{ConnectionId, UserId};
use crate::ports::EventSink;

use super::broadcaster::EventBroadcaster;

/// Unregisters its connection when dropped.
///
/// Transports hold one for as long as the client is attached. Whether the
/// stream ends cleanly, errors, or the task is aborted, the drop runs and
/// the user's locks are released.
#[derive(Debug)]
pub struct ConnectionGuard {
    broadcaster: Arc<EventBroadcaster>,
    id: ConnectionId,
}

impl ConnectionGuard {
    /// Registers a new connection and returns the guard that owns it.
    pub fn register(
        broadcaster: Arc<EventBroadcaster>,
        sink: Arc<dyn EventSink>,
        user_id: Option<UserId>,
    ) -> Self {
        let id = ConnectionId::generate();
        broadcaster.register(id.clone(), sink, user_id);
        Self { broadcaster, id }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.broadcaster.unregister(&self.id);
    }
}
