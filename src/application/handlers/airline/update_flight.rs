//! UpdateFlightHandler - Command handler for changing gate, status or departure.

use std::sync::Arc;

use crate::adapters::realtime::EventBroadcaster;
use crate::domain::airline::{AirlineError, Flight, FlightUpdate};
use crate::domain::foundation::FlightId;
use crate::domain::realtime::RealtimeEvent;
use crate::ports::AirlineRepository;

/// Command to update a flight.
#[derive(Debug, Clone)]
pub struct UpdateFlightCommand {
    pub flight_id: FlightId,
    pub update: FlightUpdate,
}

/// Handler for flight updates. Broadcasts `flight_updated` on success.
pub struct UpdateFlightHandler {
    repository: Arc<dyn AirlineRepository>,
    broadcaster: Arc<EventBroadcaster>,
}

impl UpdateFlightHandler {
    pub fn new(repository: Arc<dyn AirlineRepository>, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: UpdateFlightCommand) -> Result<Flight, AirlineError> {
        let mut flight = self
            .repository
            .find_flight(&cmd.flight_id)
            .await?
            .ok_or(AirlineError::FlightNotFound(cmd.flight_id))?;

        flight.apply(cmd.update)?;
        self.repository.update_flight(&flight).await?;

        tracing::info!(flight = %flight.flight_number, status = ?flight.status, "Flight updated");
        self.broadcaster
            .broadcast(RealtimeEvent::FlightUpdated(flight.clone()));

        Ok(flight)
    }
}
