//! DeletePassengerHandler - Removes a passenger from a flight.

use std::sync::Arc;

use crate::adapters::realtime::EventBroadcaster;
use crate::domain::airline::{AirlineError, Passenger};
use crate::domain::foundation::PassengerId;
use crate::domain::realtime::RealtimeEvent;
use crate::ports::AirlineRepository;

/// Command to delete a passenger.
#[derive(Debug, Clone)]
pub struct DeletePassengerCommand {
    pub passenger_id: PassengerId,
}

/// Handler for passenger removal. Broadcasts `passenger_deleted` with the
/// removed record.
pub struct DeletePassengerHandler {
    repository: Arc<dyn AirlineRepository>,
    broadcaster: Arc<EventBroadcaster>,
}

impl DeletePassengerHandler {
    pub fn new(repository: Arc<dyn AirlineRepository>, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: DeletePassengerCommand) -> Result<Passenger, AirlineError> {
        let removed = self
            .repository
            .delete_passenger(&cmd.passenger_id)
            .await?
            .ok_or(AirlineError::PassengerNotFound(cmd.passenger_id))?;

        tracing::info!(passenger_id = %removed.id, "Passenger deleted");
        self.broadcaster
            .broadcast(RealtimeEvent::PassengerDeleted(removed.clone()));

        Ok(removed)
    }
}
