//! In-memory airline store.
//!
//! Backs the flight and passenger API during development and in tests.
//! All state is process-local and lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::airline::{Flight, Passenger};
use crate::domain::foundation::{DomainError, ErrorCode, FlightId, PassengerId, ValidationError};
use crate::ports::AirlineRepository;

use super::seed;

/// In-memory implementation of [`AirlineRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAirlineStore {
    flights: Arc<RwLock<HashMap<FlightId, Flight>>>,
    passengers: Arc<RwLock<HashMap<PassengerId, Passenger>>>,
}

impl InMemoryAirlineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records.
    pub fn with_data(flights: Vec<Flight>, passengers: Vec<Passenger>) -> Self {
        Self {
            flights: Arc::new(RwLock::new(
                flights.into_iter().map(|f| (f.id, f)).collect(),
            )),
            passengers: Arc::new(RwLock::new(
                passengers.into_iter().map(|p| (p.id, p)).collect(),
            )),
        }
    }

    /// Create a store filled with the demo data set.
    pub fn seeded() -> Result<Self, ValidationError> {
        let (flights, passengers) = seed::sample_data()?;
        Ok(Self::with_data(flights, passengers))
    }

    /// Get the number of stored passengers
    pub async fn passenger_count(&self) -> usize {
        self.passengers.read().await.len()
    }
}

#[async_trait]
impl AirlineRepository for InMemoryAirlineStore {
    async fn list_flights(&self) -> Result<Vec<Flight>, DomainError> {
        let mut flights: Vec<Flight> = self.flights.read().await.values().cloned().collect();
        flights.sort_by(|a, b| {
            a.departure_time
                .cmp(&b.departure_time)
                .then_with(|| a.flight_number.cmp(&b.flight_number))
        });
        Ok(flights)
    }

    async fn find_flight(&self, id: &FlightId) -> Result<Option<Flight>, DomainError> {
        Ok(self.flights.read().await.get(id).cloned())
    }

    async fn update_flight(&self, flight: &Flight) -> Result<(), DomainError> {
        let mut flights = self.flights.write().await;
        match flights.get_mut(&flight.id) {
            Some(existing) => {
                *existing = flight.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::FlightNotFound,
                format!("Flight not found: {}", flight.id),
            )),
        }
    }

    async fn list_passengers(&self, flight_id: &FlightId) -> Result<Vec<Passenger>, DomainError> {
        let mut passengers: Vec<Passenger> = self
            .passengers
            .read()
            .await
            .values()
            .filter(|p| &p.flight_id == flight_id)
            .cloned()
            .collect();
        passengers.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(passengers)
    }

    async fn find_passenger(&self, id: &PassengerId) -> Result<Option<Passenger>, DomainError> {
        Ok(self.passengers.read().await.get(id).cloned())
    }

    async fn update_passenger(&self, passenger: &Passenger) -> Result<(), DomainError> {
        let mut passengers = self.passengers.write().await;
        match passengers.get_mut(&passenger.id) {
            Some(existing) => {
                *existing = passenger.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::PassengerNotFound,
                format!("Passenger not found: {}", passenger.id),
            )),
        }
    }

    async fn delete_passenger(&self, id: &PassengerId) -> Result<Option<Passenger>, DomainError> {
        Ok(self.passengers.write().await.remove(id))
    }
}
