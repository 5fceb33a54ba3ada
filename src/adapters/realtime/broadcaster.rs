//! Event fan-out and the seat lock façade.
//!
//! # Architecture
//!
//! ```text
//!   register / unregister        acquire / release / list / sweep
//!            │                                 │
//!            ▼                                 ▼
//!   ConnectionRegistry ◀── EventBroadcaster ──▶ SeatLockTable
//!            │                    │
//!            └──── snapshot ──────┴──▶ sink.send(json) per connection
//! ```
//!
//! Lock state can only be changed through this type, and every change is
//! announced before the call returns. Nothing here awaits: a sink that
//! cannot take a message right away counts as disconnected.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::foundation::{ConnectionId, SeatId, Timestamp, UserId};
use crate::domain::realtime::{RealtimeEvent, SeatLock};
use crate::ports::{Clock, EventSink};

use super::lock_table::{AcquireOutcome, SeatLockTable};
use super::registry::{Connection, ConnectionRegistry};

/// Process-wide hub for subscriber connections and seat locks.
///
/// Construct one and share it behind an `Arc`.
///
/// # Ordering
///
/// Every lock change and the events announcing it form one step under the
/// `sequence` mutex, and plain broadcasts take the same mutex. Two steps
/// never interleave, so each connection sees lock events in the order the
/// table changed. Connections whose sink failed during a step are
/// unregistered after the mutex is released.
pub struct EventBroadcaster {
    registry: ConnectionRegistry,
    locks: SeatLockTable,
    clock: Arc<dyn Clock>,
    sequence: Mutex<()>,
}

impl EventBroadcaster {
    pub fn new(lock_duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            locks: SeatLockTable::new(lock_duration),
            clock,
            sequence: Mutex::new(()),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn lock_duration(&self) -> Duration {
        self.locks.duration()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Connections
    // ════════════════════════════════════════════════════════════════════════

    /// Sends `sink` its private `connection_established`, then adds it.
    ///
    /// The acknowledgement goes out before the connection is visible to
    /// broadcasts, so it is always the first message on the sink. If it
    /// cannot be delivered the connection is never added. An id collision
    /// replaces the earlier entry.
    pub fn register(
        &self,
        id: ConnectionId,
        sink: Arc<dyn EventSink>,
        user_id: Option<UserId>,
    ) {
        let now = self.clock.now();
        let ack = RealtimeEvent::connection_established(id.clone(), now);
        let payload = match ack.stamp(now).and_then(|message| message.to_json()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode connection acknowledgement");
                return;
            }
        };
        if sink.send(&payload).is_err() {
            tracing::debug!(connection_id = %id, "Subscriber gone before acknowledgement");
            return;
        }

        let connection = Arc::new(Connection::new(id.clone(), sink, user_id));
        if self.registry.insert(Arc::clone(&connection)).is_some() {
            tracing::warn!(connection_id = %id, "Connection id reused, replacing earlier entry");
        }

        tracing::debug!(
            connection_id = %id,
            user_id = connection.user_id().map(UserId::as_str).unwrap_or("-"),
            connections = self.registry.count(),
            "Subscriber connected"
        );
    }

    /// Removes a subscriber and releases every lock its user holds.
    ///
    /// Returns `false` when the id was not registered, which is expected
    /// when both a transport error and a close fire for the same socket.
    pub fn unregister(&self, id: &ConnectionId) -> bool {
        let Some(connection) = self.registry.remove(id) else {
            return false;
        };

        tracing::debug!(
            connection_id = %id,
            connections = self.registry.count(),
            "Subscriber disconnected"
        );

        if let Some(user_id) = connection.user_id() {
            self.sequenced(|dead| {
                let released = self.locks.release_all_for(user_id);
                if !released.is_empty() {
                    tracing::debug!(
                        user_id = %user_id,
                        count = released.len(),
                        "Released seat locks of departed subscriber"
                    );
                }
                self.announce_unlocked(&released, dead);
            });
        }

        true
    }

    pub fn connection_count(&self) -> usize {
        self.registry.count()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Fan-out
    // ════════════════════════════════════════════════════════════════════════

    /// Stamps `event` with the current time and pushes it to every live
    /// connection. Returns the number of successful deliveries.
    ///
    /// Connections registered after the snapshot is taken miss this event.
    /// Any connection whose sink fails is unregistered once the pass is over.
    pub fn broadcast(&self, event: RealtimeEvent) -> usize {
        self.sequenced(|dead| self.deliver(event, dead))
    }

    /// Runs `step` while holding the sequence mutex, then unregisters the
    /// connections it found dead.
    fn sequenced<T>(&self, step: impl FnOnce(&mut Vec<ConnectionId>) -> T) -> T {
        let mut dead = Vec::new();
        let result = {
            let _turn = self.sequence.lock().unwrap_or_else(PoisonError::into_inner);
            step(&mut dead)
        };

        for id in dead {
            tracing::debug!(connection_id = %id, "Dropping subscriber after failed send");
            self.unregister(&id);
        }

        result
    }

    /// Sends one event to the current snapshot. Only call inside a step.
    ///
    /// A connection already in `dead` is skipped: a sink is never written
    /// again after it has reported closed.
    fn deliver(&self, event: RealtimeEvent, dead: &mut Vec<ConnectionId>) -> usize {
        let kind = event.kind();
        let payload = match event
            .stamp(self.clock.now())
            .and_then(|message| message.to_json())
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(event = %kind, error = %e, "Failed to encode event, dropping it");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut failed = 0;
        for connection in self.registry.snapshot() {
            if dead.contains(connection.id()) {
                continue;
            }
            match connection.send(&payload) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    failed += 1;
                    dead.push(connection.id().clone());
                }
            }
        }

        tracing::debug!(event = %kind, delivered, failed, "Broadcast event");
        delivered
    }

    // ════════════════════════════════════════════════════════════════════════
    // Seat locks
    // ════════════════════════════════════════════════════════════════════════

    /// Tries to take (or refresh) a seat for `holder`.
    ///
    /// Grants and refreshes broadcast `seat_locked`. If a stale lock was
    /// discarded on the way, its `seat_unlocked` goes out first.
    pub fn acquire_lock(&self, seat_id: SeatId, holder: UserId) -> AcquireOutcome {
        self.sequenced(|dead| {
            let acquisition = self.locks.acquire(seat_id, holder, self.clock.now());

            if let Some(expired) = &acquisition.expired {
                self.announce_unlocked(std::slice::from_ref(expired), dead);
            }

            match &acquisition.outcome {
                AcquireOutcome::Granted(lock) | AcquireOutcome::Refreshed(lock) => {
                    tracing::debug!(seat = %lock.seat_id, user_id = %lock.holder, "Seat locked");
                    self.deliver(RealtimeEvent::seat_locked(lock), dead);
                }
                AcquireOutcome::Denied(lock) => {
                    tracing::debug!(seat = %lock.seat_id, holder = %lock.holder, "Seat lock denied");
                }
            }

            acquisition.outcome
        })
    }

    /// Releases a seat if `holder` owns it. Returns whether anything changed;
    /// a release by anyone else is silently ignored.
    pub fn release_lock(&self, seat_id: &SeatId, holder: &UserId) -> bool {
        self.sequenced(|dead| match self.locks.release(seat_id, holder) {
            Some(lock) => {
                self.announce_unlocked(std::slice::from_ref(&lock), dead);
                true
            }
            None => false,
        })
    }

    /// All live locks sorted by seat. Expired entries found during the scan
    /// are evicted and announced.
    pub fn list_locks(&self) -> Vec<SeatLock> {
        self.sequenced(|dead| {
            let scan = self.locks.scan(self.clock.now());
            self.announce_unlocked(&scan.evicted, dead);
            scan.active
        })
    }

    /// The live lock on one seat, if any.
    pub fn current_lock(&self, seat_id: &SeatId) -> Option<SeatLock> {
        self.sequenced(|dead| {
            let (live, evicted) = self.locks.get(seat_id, self.clock.now());
            if let Some(evicted) = evicted {
                self.announce_unlocked(std::slice::from_ref(&evicted), dead);
            }
            live
        })
    }

    /// Periodic pass: removes every expired lock and announces each one.
    pub fn sweep_expired(&self) -> usize {
        self.sequenced(|dead| {
            let expired = self.locks.remove_expired(self.clock.now());
            if !expired.is_empty() {
                tracing::debug!(count = expired.len(), "Swept expired seat locks");
            }
            self.announce_unlocked(&expired, dead);
            expired.len()
        })
    }

    fn announce_unlocked(&self, locks: &[SeatLock], dead: &mut Vec<ConnectionId>) {
        for lock in locks {
            tracing::debug!(seat = %lock.seat_id, user_id = %lock.holder, "Seat unlocked");
            self.deliver(RealtimeEvent::seat_unlocked(lock), dead);
        }
    }
}

impl std::fmt::Debug for EventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBroadcaster")
            .field("connections", &self.registry.count())
            .field("locks", &self.locks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, PoisonError};

    use crate::domain::realtime::EventMessage;
    use crate::ports::{EventSink, SinkClosed};

    /// Sink that keeps every payload it is handed.
    #[derive(Default)]
    pub struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        pub fn messages(&self) -> Vec<EventMessage> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|raw| serde_json::from_str(raw).unwrap())
                .collect()
        }

        pub fn kinds(&self) -> Vec<String> {
            self.messages()
                .iter()
                .map(|m| m.kind.to_string())
                .collect()
        }
    }

    impl EventSink for RecordingSink {
        fn send(&self, payload: &str) -> Result<(), SinkClosed> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(payload.to_owned());
            Ok(())
        }
    }

    /// Sink that accepts `budget` messages and then reports closed.
    pub struct FlakySink {
        budget: Mutex<usize>,
        attempts: Mutex<usize>,
    }

    impl FlakySink {
        pub fn accepting(budget: usize) -> Self {
            Self {
                budget: Mutex::new(budget),
                attempts: Mutex::new(0),
            }
        }

        /// Every `send` call, accepted or not.
        pub fn attempts(&self) -> usize {
            *self.attempts.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl EventSink for FlakySink {
        fn send(&self, _payload: &str) -> Result<(), SinkClosed> {
            *self.attempts.lock().unwrap_or_else(PoisonError::into_inner) += 1;
            let mut budget = self.budget.lock().unwrap_or_else(PoisonError::into_inner);
            if *budget == 0 {
                return Err(SinkClosed);
            }
            *budget -= 1;
            Ok(())
        }
    }
}
