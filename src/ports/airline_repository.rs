//! AirlineRepository port - storage for flights and passengers.

use async_trait::async_trait;

use crate::domain::airline::{Flight, Passenger};
use crate::domain::foundation::{DomainError, FlightId, PassengerId};

/// Repository for flight and passenger records.
///
/// Implementations must return records in a stable order: flights by
/// departure time, passengers by last name then first name.
#[async_trait]
pub trait AirlineRepository: Send + Sync {
    /// All flights.
    async fn list_flights(&self) -> Result<Vec<Flight>, DomainError>;

    /// Find a flight by ID.
    async fn find_flight(&self, id: &FlightId) -> Result<Option<Flight>, DomainError>;

    /// Replace an existing flight.
    ///
    /// # Errors
    ///
    /// - `FlightNotFound` if the flight doesn't exist
    async fn update_flight(&self, flight: &Flight) -> Result<(), DomainError>;

    /// Passengers booked on a flight.
    async fn list_passengers(&self, flight_id: &FlightId) -> Result<Vec<Passenger>, DomainError>;

    /// Find a passenger by ID.
    async fn find_passenger(&self, id: &PassengerId) -> Result<Option<Passenger>, DomainError>;

    /// Replace an existing passenger.
    ///
    /// # Errors
    ///
    /// - `PassengerNotFound` if the passenger doesn't exist
    async fn update_passenger(&self, passenger: &Passenger) -> Result<(), DomainError>;

    /// Remove a passenger, returning the removed record.
    async fn delete_passenger(&self, id: &PassengerId) -> Result<Option<Passenger>, DomainError>;
}
