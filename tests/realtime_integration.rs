//! Integration tests for the realtime core.
//!
//! These drive the public broadcaster API with in-memory sinks and a manual
//! clock, the same way the HTTP and WebSocket transports do.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use flight_desk::adapters::realtime::{AcquireOutcome, ConnectionGuard, EventBroadcaster, ExpirySweeper};
use flight_desk::adapters::{ManualClock, SystemClock};
use flight_desk::domain::airline::{Flight, SeatMap};
use flight_desk::domain::foundation::{ConnectionId, SeatId, Timestamp, UserId};
use flight_desk::domain::realtime::{EventMessage, RealtimeEvent};
use flight_desk::ports::{EventSink, SinkClosed};

// ════════════════════════════════════════════════════════════════════════════
// Test sinks
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Inbox {
    payloads: Mutex<Vec<String>>,
}

impl Inbox {
    fn messages(&self) -> Vec<EventMessage> {
        self.payloads
            .lock()
            .unwrap()
            .iter()
            .map(|p| serde_json::from_str(p).unwrap())
            .collect()
    }

    fn first(&self) -> Option<EventMessage> {
        self.payloads
            .lock()
            .unwrap()
            .first()
            .map(|p| serde_json::from_str(p).unwrap())
    }

    fn kinds(&self) -> Vec<String> {
        self.messages()
            .iter()
            .map(|m| m.kind.as_str().to_string())
            .collect()
    }
}

impl EventSink for Inbox {
    fn send(&self, payload: &str) -> Result<(), SinkClosed> {
        self.payloads.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}

/// Accepts a fixed number of messages, then reports closed.
struct Dying {
    remaining: AtomicUsize,
}

impl Dying {
    fn after(n: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(n),
        }
    }
}

impl EventSink for Dying {
    fn send(&self, _payload: &str) -> Result<(), SinkClosed> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| SinkClosed)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

const LOCK_SECS: u64 = 30;

fn setup() -> (Arc<EventBroadcaster>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Timestamp::from_unix_millis(1_700_000_000_000).unwrap(),
    ));
    let broadcaster = Arc::new(EventBroadcaster::new(
        Duration::from_secs(LOCK_SECS),
        clock.clone(),
    ));
    (broadcaster, clock)
}

fn seat(raw: &str) -> SeatId {
    SeatId::new(raw).unwrap()
}

fn user(raw: &str) -> UserId {
    UserId::new(raw).unwrap()
}

fn attach(broadcaster: &EventBroadcaster, id: &str, who: Option<&str>) -> Arc<Inbox> {
    let inbox = Arc::new(Inbox::default());
    broadcaster.register(ConnectionId::new(id).unwrap(), inbox.clone(), who.map(user));
    inbox
}

fn sample_flight() -> Flight {
    Flight::new(
        "FD101",
        "SFO",
        "SEA",
        Timestamp::from_unix_millis(1_700_003_600_000).unwrap(),
        SeatMap::new(20, "ABCD").unwrap(),
    )
    .unwrap()
}

// ════════════════════════════════════════════════════════════════════════════
// Connections and fan-out
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn new_connection_is_acknowledged_before_anything_else() {
    let (broadcaster, _clock) = setup();
    let inbox = attach(&broadcaster, "conn-1", Some("agent-1"));

    broadcaster.broadcast(RealtimeEvent::FlightUpdated(sample_flight()));

    let messages = inbox.messages();
    assert_eq!(messages[0].kind.as_str(), "connection_established");
    assert_eq!(messages[0].data["connectionId"], "conn-1");
    assert_eq!(messages[1].kind.as_str(), "flight_updated");
}

#[test]
fn acknowledgement_comes_first_while_others_broadcast() {
    let (broadcaster, _clock) = setup();
    let stop = AtomicBool::new(false);

    let inboxes: Vec<Arc<Inbox>> = thread::scope(|scope| {
        scope.spawn(|| {
            while !stop.load(Ordering::SeqCst) {
                broadcaster.broadcast(RealtimeEvent::FlightUpdated(sample_flight()));
            }
        });

        let joiners: Vec<_> = (0..4)
            .map(|t| {
                let broadcaster = &broadcaster;
                scope.spawn(move || {
                    (0..50)
                        .map(|n| attach(broadcaster, &format!("conn-{}-{}", t, n), None))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let inboxes = joiners
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        stop.store(true, Ordering::SeqCst);
        inboxes
    });

    assert_eq!(inboxes.len(), 200);
    for inbox in inboxes {
        let first = inbox.first().unwrap();
        assert_eq!(first.kind.as_str(), "connection_established");
    }
}

#[test]
fn every_open_connection_receives_each_broadcast() {
    let (broadcaster, _clock) = setup();
    let inboxes: Vec<_> = (0..4)
        .map(|n| attach(&broadcaster, &format!("conn-{}", n), None))
        .collect();

    let delivered = broadcaster.broadcast(RealtimeEvent::FlightUpdated(sample_flight()));

    assert_eq!(delivered, 4);
    for inbox in inboxes {
        assert_eq!(inbox.kinds(), vec!["connection_established", "flight_updated"]);
    }
}

#[test]
fn dead_connection_is_dropped_without_affecting_others() {
    let (broadcaster, _clock) = setup();
    let healthy = attach(&broadcaster, "healthy", None);
    // Accepts the acknowledgement, then fails.
    broadcaster.register(ConnectionId::new("dying").unwrap(), Arc::new(Dying::after(1)), None);
    assert_eq!(broadcaster.connection_count(), 2);

    let delivered = broadcaster.broadcast(RealtimeEvent::FlightUpdated(sample_flight()));

    assert_eq!(delivered, 1);
    assert_eq!(broadcaster.connection_count(), 1);
    assert_eq!(healthy.kinds().last().map(String::as_str), Some("flight_updated"));
}

#[test]
fn events_arrive_in_broadcast_order() {
    let (broadcaster, clock) = setup();
    let inbox = attach(&broadcaster, "observer", None);

    broadcaster.acquire_lock(seat("4C"), user("agent-1"));
    clock.advance(Duration::from_secs(1));
    broadcaster.broadcast(RealtimeEvent::FlightUpdated(sample_flight()));
    broadcaster.release_lock(&seat("4C"), &user("agent-1"));

    assert_eq!(
        inbox.kinds(),
        vec!["connection_established", "seat_locked", "flight_updated", "seat_unlocked"]
    );
    let stamps: Vec<_> = inbox.messages().iter().map(|m| m.timestamp).collect();
    assert!(stamps.windows(2).all(|w| !w[1].is_before(&w[0])));
}

#[test]
fn broadcast_timestamp_is_taken_at_send_time() {
    let broadcaster = EventBroadcaster::new(Duration::from_secs(LOCK_SECS), Arc::new(SystemClock));
    let inbox = Arc::new(Inbox::default());
    broadcaster.register(ConnectionId::new("live").unwrap(), inbox.clone(), None);

    let before = Timestamp::now();
    broadcaster.broadcast(RealtimeEvent::FlightUpdated(sample_flight()));

    let last = inbox.messages().pop().unwrap();
    assert_eq!(last.kind.as_str(), "flight_updated");
    assert!(!last.timestamp.is_before(&before));
}

// ════════════════════════════════════════════════════════════════════════════
// Seat locks
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn only_one_user_holds_a_seat() {
    let (broadcaster, _clock) = setup();
    let observer = attach(&broadcaster, "observer", None);

    assert!(broadcaster.acquire_lock(seat("7B"), user("agent-1")).is_granted());
    let denied = broadcaster.acquire_lock(seat("7B"), user("agent-2"));

    match denied {
        AcquireOutcome::Denied(lock) => assert_eq!(lock.holder, user("agent-1")),
        other => panic!("expected denial, got {:?}", other),
    }
    assert_eq!(broadcaster.list_locks().len(), 1);
    // A denial announces nothing.
    assert_eq!(observer.kinds(), vec!["connection_established", "seat_locked"]);
}

#[test]
fn holder_can_refresh_their_lock() {
    let (broadcaster, clock) = setup();
    let first = broadcaster.acquire_lock(seat("7B"), user("agent-1")).lock().expires_at;

    clock.advance(Duration::from_secs(20));
    let outcome = broadcaster.acquire_lock(seat("7B"), user("agent-1"));

    assert!(matches!(outcome, AcquireOutcome::Refreshed(_)));
    assert!(outcome.lock().expires_at.is_after(&first));
}

#[test]
fn release_by_non_holder_changes_nothing() {
    let (broadcaster, _clock) = setup();
    let observer = attach(&broadcaster, "observer", None);
    broadcaster.acquire_lock(seat("2A"), user("agent-1"));

    assert!(!broadcaster.release_lock(&seat("2A"), &user("agent-2")));
    assert!(!broadcaster.release_lock(&seat("9Z"), &user("agent-1")));

    assert_eq!(broadcaster.list_locks().len(), 1);
    assert_eq!(observer.kinds(), vec!["connection_established", "seat_locked"]);
}

#[test]
fn seat_ids_are_normalized() {
    let (broadcaster, _clock) = setup();
    broadcaster.acquire_lock(seat(" 12f "), user("agent-1"));

    assert!(!broadcaster.acquire_lock(seat("12F"), user("agent-2")).is_granted());
}

#[test]
fn closing_a_connection_releases_its_users_locks() {
    let (broadcaster, _clock) = setup();
    let observer = attach(&broadcaster, "observer", None);
    let guard = ConnectionGuard::register(
        broadcaster.clone(),
        Arc::new(Inbox::default()),
        Some(user("agent-1")),
    );
    broadcaster.acquire_lock(seat("1A"), user("agent-1"));
    broadcaster.acquire_lock(seat("1B"), user("agent-1"));
    broadcaster.acquire_lock(seat("1C"), user("agent-2"));

    drop(guard);

    let remaining = broadcaster.list_locks();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].holder, user("agent-2"));
    let unlocked = observer
        .kinds()
        .into_iter()
        .filter(|k| k == "seat_unlocked")
        .count();
    assert_eq!(unlocked, 2);
}

// ════════════════════════════════════════════════════════════════════════════
// Expiry
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn expired_lock_can_be_taken_by_someone_else() {
    let (broadcaster, clock) = setup();
    let observer = attach(&broadcaster, "observer", None);
    broadcaster.acquire_lock(seat("5D"), user("agent-1"));

    // Still alive at exactly the expiry instant.
    clock.advance(Duration::from_secs(LOCK_SECS));
    assert!(!broadcaster.acquire_lock(seat("5D"), user("agent-2")).is_granted());

    clock.advance(Duration::from_millis(1));
    let outcome = broadcaster.acquire_lock(seat("5D"), user("agent-2"));

    assert!(matches!(outcome, AcquireOutcome::Granted(_)));
    assert_eq!(
        observer.kinds(),
        vec!["connection_established", "seat_locked", "seat_unlocked", "seat_locked"]
    );
}

#[test]
fn expired_locks_are_hidden_from_listing() {
    let (broadcaster, clock) = setup();
    broadcaster.acquire_lock(seat("5D"), user("agent-1"));
    clock.advance(Duration::from_secs(LOCK_SECS + 1));

    assert!(broadcaster.list_locks().is_empty());
    assert!(broadcaster.current_lock(&seat("5D")).is_none());
}

#[tokio::test(start_paused = true)]
async fn sweeper_announces_abandoned_locks() {
    let (broadcaster, clock) = setup();
    let observer = attach(&broadcaster, "observer", None);
    broadcaster.acquire_lock(seat("8A"), user("agent-1"));
    clock.advance(Duration::from_secs(LOCK_SECS + 1));

    let handle = ExpirySweeper::new(broadcaster.clone(), Duration::from_secs(10)).spawn();
    tokio::time::sleep(Duration::from_secs(11)).await;
    handle.shutdown().await;

    let last = observer.messages().pop().unwrap();
    assert_eq!(last.kind.as_str(), "seat_unlocked");
    assert_eq!(last.data["seatId"], "8A");
    assert_eq!(last.data["userId"], "agent-1");
}

#[test]
fn concurrent_lock_traffic_keeps_observers_in_step_with_the_table() {
    let (broadcaster, clock) = setup();
    let observer = attach(&broadcaster, "observer", None);
    let seats = ["1A", "1B", "1C"];
    let agents = ["agent-1", "agent-2", "agent-3"];

    thread::scope(|scope| {
        for (n, agent) in agents.iter().enumerate() {
            let broadcaster = &broadcaster;
            scope.spawn(move || {
                for i in 0..300 {
                    let target = seat(seats[(i + n) % seats.len()]);
                    if i % 3 == 2 {
                        broadcaster.release_lock(&target, &user(agent));
                    } else {
                        broadcaster.acquire_lock(target, user(agent));
                    }
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..100 {
                clock.advance(Duration::from_secs(7));
                broadcaster.sweep_expired();
            }
        });
    });

    let table: HashMap<String, String> = broadcaster
        .list_locks()
        .into_iter()
        .map(|lock| (lock.seat_id.to_string(), lock.holder.to_string()))
        .collect();

    // Replay what the observer was told, keyed by seat.
    let mut view = HashMap::new();
    for message in observer.messages() {
        let seat_id = message.data["seatId"].as_str().map(str::to_string);
        match (message.kind.as_str(), seat_id) {
            ("seat_locked", Some(seat_id)) => {
                view.insert(seat_id, message.data["userId"].as_str().unwrap().to_string());
            }
            ("seat_unlocked", Some(seat_id)) => {
                view.remove(&seat_id);
            }
            _ => {}
        }
    }

    assert_eq!(view, table);
}
