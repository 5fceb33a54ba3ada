//! Shared fixture for airline handler tests.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::clock::ManualClock;
use crate::adapters::memory::InMemoryAirlineStore;
use crate::adapters::realtime::test_support::RecordingSink;
use crate::adapters::realtime::EventBroadcaster;
use crate::domain::airline::{Flight, Passenger, SeatMap};
use crate::domain::foundation::{ConnectionId, SeatId, Timestamp};
use crate::ports::AirlineRepository;

pub struct Fixture {
    pub store: Arc<InMemoryAirlineStore>,
    pub broadcaster: Arc<EventBroadcaster>,
    pub clock: Arc<ManualClock>,
    pub observer: Arc<RecordingSink>,
    pub flight: Flight,
    /// Seated in 1A.
    pub ada: Passenger,
    /// Seated in 1B.
    pub grace: Passenger,
    /// No seat yet.
    pub alan: Passenger,
}

impl Fixture {
    pub fn new() -> Self {
        let flight = Flight::new(
            "FD101",
            "SFO",
            "SEA",
            Timestamp::from_unix_millis(1_700_003_600_000).unwrap(),
            SeatMap::new(20, "ABCD").unwrap(),
        )
        .unwrap();
        let ada = Passenger::new(flight.id, "Ada", "Lovelace")
            .unwrap()
            .with_seat(SeatId::new("1A").unwrap());
        let grace = Passenger::new(flight.id, "Grace", "Hopper")
            .unwrap()
            .with_seat(SeatId::new("1B").unwrap());
        let alan = Passenger::new(flight.id, "Alan", "Turing").unwrap();

        let store = Arc::new(InMemoryAirlineStore::with_data(
            vec![flight.clone()],
            vec![ada.clone(), grace.clone(), alan.clone()],
        ));
        let clock = Arc::new(ManualClock::new(
            Timestamp::from_unix_millis(1_700_000_000_000).unwrap(),
        ));
        let broadcaster = Arc::new(EventBroadcaster::new(Duration::from_secs(30), clock.clone()));
        let observer = Arc::new(RecordingSink::default());
        broadcaster.register(ConnectionId::new("observer").unwrap(), observer.clone(), None);

        Self {
            store,
            broadcaster,
            clock,
            observer,
            flight,
            ada,
            grace,
            alan,
        }
    }

    pub fn repository(&self) -> Arc<dyn AirlineRepository> {
        self.store.clone()
    }

    /// Event kinds seen after the connection acknowledgement.
    pub fn broadcast_kinds(&self) -> Vec<String> {
        self.observer.kinds().into_iter().skip(1).collect()
    }
}
