//! Read-side queries over flights and passengers.

use std::sync::Arc;

use crate::domain::airline::{AirlineError, Flight, Passenger};
use crate::domain::foundation::{FlightId, PassengerId};
use crate::ports::AirlineRepository;

/// Query handler for the departures board and passenger lists.
pub struct AirlineQueries {
    repository: Arc<dyn AirlineRepository>,
}

impl AirlineQueries {
    pub fn new(repository: Arc<dyn AirlineRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_flights(&self) -> Result<Vec<Flight>, AirlineError> {
        Ok(self.repository.list_flights().await?)
    }

    pub async fn get_flight(&self, id: FlightId) -> Result<Flight, AirlineError> {
        self.repository
            .find_flight(&id)
            .await?
            .ok_or(AirlineError::FlightNotFound(id))
    }

    /// Passengers on a flight. An unknown flight is an error rather than an
    /// empty list.
    pub async fn list_passengers(&self, flight_id: FlightId) -> Result<Vec<Passenger>, AirlineError> {
        self.get_flight(flight_id).await?;
        Ok(self.repository.list_passengers(&flight_id).await?)
    }

    pub async fn get_passenger(&self, id: PassengerId) -> Result<Passenger, AirlineError> {
        self.repository
            .find_passenger(&id)
            .await?
            .ok_or(AirlineError::PassengerNotFound(id))
    }
}
