//! Registry of live subscriber connections.
//!
//! ```text
//! ConnectionRegistry
//! ├── conn-a (user: agent-1) ──▶ sink
//! ├── conn-b (user: agent-1) ──▶ sink
//! └── conn-c (anonymous)     ──▶ sink
//! ```
//!
//! The registry is plain storage. Side effects of joining and leaving
//! (acknowledgement, lock release) live in the broadcaster, which is the
//! only caller.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{ConnectionId, UserId};
use crate::ports::{EventSink, SinkClosed};

/// One live subscriber channel.
pub(crate) struct Connection {
    id: ConnectionId,
    user_id: Option<UserId>,
    sink: Arc<dyn EventSink>,
}

impl Connection {
    pub fn new(id: ConnectionId, sink: Arc<dyn EventSink>, user_id: Option<UserId>) -> Self {
        Self { id, user_id, sink }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn send(&self, payload: &str) -> Result<(), SinkClosed> {
        self.sink.send(payload)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Live connections keyed by connection id.
///
/// # Thread Safety
///
/// Uses an `RwLock` since fan-out snapshots (reads) vastly outnumber
/// joins and leaves (writes). The lock is never held while a sink is
/// written; fan-out works on a [`snapshot`](Self::snapshot).
#[derive(Default)]
pub(crate) struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Arc<Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a connection, returning the entry it replaced if the id was
    /// already taken.
    pub fn insert(&self, connection: Arc<Connection>) -> Option<Arc<Connection>> {
        self.write().insert(connection.id().clone(), connection)
    }

    /// Removes a connection. Absent ids are not an error.
    pub fn remove(&self, id: &ConnectionId) -> Option<Arc<Connection>> {
        self.write().remove(id)
    }

    #[cfg(test)]
    fn get(&self, id: &ConnectionId) -> Option<Arc<Connection>> {
        self.read().get(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Copies the current connection set so callers can write to sinks
    /// without holding the registry lock.
    pub fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.read().values().cloned().collect()
    }

    // A poisoned map is still structurally valid: every mutation is a single
    // HashMap call.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ConnectionId, Arc<Connection>>> {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ConnectionId, Arc<Connection>>> {
        self.connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
