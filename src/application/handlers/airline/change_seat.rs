//! ChangeSeatHandler - Moves a passenger to another seat on the same flight.
//!
//! The move is refused when:
//! - the seat is not on the aircraft's seat map
//! - another passenger on the flight already sits there
//! - someone other than the requesting user holds a live lock on the seat
//!
//! On success the requester's lock on the new seat, if any, is released so
//! other agents can pick it up again.

use std::sync::Arc;

use crate::adapters::realtime::EventBroadcaster;
use crate::domain::airline::{AirlineError, Passenger};
use crate::domain::foundation::{PassengerId, SeatId, UserId};
use crate::domain::realtime::RealtimeEvent;
use crate::ports::AirlineRepository;

/// Command to reassign a passenger's seat.
#[derive(Debug, Clone)]
pub struct ChangeSeatCommand {
    pub passenger_id: PassengerId,
    pub seat: SeatId,
    /// Agent making the change. Anonymous callers cannot override any lock.
    pub user_id: Option<UserId>,
}

/// Handler for seat changes. Broadcasts `seat_changed` on success.
pub struct ChangeSeatHandler {
    repository: Arc<dyn AirlineRepository>,
    broadcaster: Arc<EventBroadcaster>,
}

impl ChangeSeatHandler {
    pub fn new(repository: Arc<dyn AirlineRepository>, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: ChangeSeatCommand) -> Result<Passenger, AirlineError> {
        // 1. Load passenger and their flight
        let mut passenger = self
            .repository
            .find_passenger(&cmd.passenger_id)
            .await?
            .ok_or(AirlineError::PassengerNotFound(cmd.passenger_id))?;

        let flight = self
            .repository
            .find_flight(&passenger.flight_id)
            .await?
            .ok_or(AirlineError::FlightNotFound(passenger.flight_id))?;

        // 2. Seat must exist on the aircraft
        if !flight.seat_map.contains(&cmd.seat) {
            return Err(AirlineError::SeatOutsideCabin(cmd.seat));
        }

        // 3. Seat must be free
        let occupant = self
            .repository
            .list_passengers(&flight.id)
            .await?
            .into_iter()
            .find(|other| other.id != passenger.id && other.seat.as_ref() == Some(&cmd.seat));
        if let Some(occupant) = occupant {
            return Err(AirlineError::SeatOccupied {
                seat: cmd.seat,
                passenger_id: occupant.id,
            });
        }

        // 4. Nobody else may be editing the seat
        if let Some(lock) = self.broadcaster.current_lock(&cmd.seat) {
            let held_by_requester = cmd
                .user_id
                .as_ref()
                .is_some_and(|user| lock.is_held_by(user));
            if !held_by_requester {
                return Err(AirlineError::SeatLocked {
                    seat: cmd.seat,
                    holder: lock.holder,
                });
            }
        }

        // 5. Persist and announce
        let previous = passenger.assign_seat(cmd.seat.clone());
        self.repository.update_passenger(&passenger).await?;

        tracing::info!(
            passenger_id = %passenger.id,
            from = previous.as_ref().map(SeatId::as_str).unwrap_or("-"),
            to = %cmd.seat,
            "Seat changed"
        );
        self.broadcaster
            .broadcast(RealtimeEvent::SeatChanged(passenger.clone()));

        if let Some(user) = &cmd.user_id {
            self.broadcaster.release_lock(&cmd.seat, user);
        }

        Ok(passenger)
    }
}
