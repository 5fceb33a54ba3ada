//! UpdatePassengerHandler - Command handler for passenger details and services.

use std::sync::Arc;

use crate::adapters::realtime::EventBroadcaster;
use crate::domain::airline::{AirlineError, Passenger, PassengerUpdate};
use crate::domain::foundation::PassengerId;
use crate::domain::realtime::RealtimeEvent;
use crate::ports::AirlineRepository;

/// Command to edit a passenger.
#[derive(Debug, Clone)]
pub struct UpdatePassengerCommand {
    pub passenger_id: PassengerId,
    pub update: PassengerUpdate,
}

/// Handler for passenger edits. Broadcasts `passenger_updated` on success.
pub struct UpdatePassengerHandler {
    repository: Arc<dyn AirlineRepository>,
    broadcaster: Arc<EventBroadcaster>,
}

impl UpdatePassengerHandler {
    pub fn new(repository: Arc<dyn AirlineRepository>, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: UpdatePassengerCommand) -> Result<Passenger, AirlineError> {
        let mut passenger = self
            .repository
            .find_passenger(&cmd.passenger_id)
            .await?
            .ok_or(AirlineError::PassengerNotFound(cmd.passenger_id))?;

        passenger.apply(cmd.update)?;
        self.repository.update_passenger(&passenger).await?;

        tracing::debug!(passenger_id = %passenger.id, "Passenger updated");
        self.broadcaster
            .broadcast(RealtimeEvent::PassengerUpdated(passenger.clone()));

        Ok(passenger)
    }
}
