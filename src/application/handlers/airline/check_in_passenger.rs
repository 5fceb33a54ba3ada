//! CheckInPassengerHandler - Toggles a passenger's check-in state.

use std::sync::Arc;

use crate::adapters::realtime::EventBroadcaster;
use crate::domain::airline::{AirlineError, Passenger};
use crate::domain::foundation::PassengerId;
use crate::domain::realtime::RealtimeEvent;
use crate::ports::AirlineRepository;

/// Command to check a passenger in, or undo a check-in.
#[derive(Debug, Clone)]
pub struct CheckInPassengerCommand {
    pub passenger_id: PassengerId,
}

/// Handler for check-in toggles. Broadcasts `passenger_checked_in` either way.
pub struct CheckInPassengerHandler {
    repository: Arc<dyn AirlineRepository>,
    broadcaster: Arc<EventBroadcaster>,
}

impl CheckInPassengerHandler {
    pub fn new(repository: Arc<dyn AirlineRepository>, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: CheckInPassengerCommand) -> Result<Passenger, AirlineError> {
        let mut passenger = self
            .repository
            .find_passenger(&cmd.passenger_id)
            .await?
            .ok_or(AirlineError::PassengerNotFound(cmd.passenger_id))?;

        let checked_in = passenger.toggle_check_in(self.broadcaster.now());
        self.repository.update_passenger(&passenger).await?;

        tracing::info!(passenger_id = %passenger.id, checked_in, "Check-in toggled");
        self.broadcaster
            .broadcast(RealtimeEvent::PassengerCheckedIn(passenger.clone()));

        Ok(passenger)
    }
}
