//! Flight and passenger command and query handlers.
//!
//! Every command persists through `AirlineRepository` and, only once the
//! write succeeded, announces the new record through the broadcaster.

mod change_seat;
mod check_in_passenger;
mod delete_passenger;
mod queries;
mod update_flight;
mod update_passenger;

#[cfg(test)]
mod test_support;

pub use change_seat::{ChangeSeatCommand, ChangeSeatHandler};
pub use check_in_passenger::{CheckInPassengerCommand, CheckInPassengerHandler};
pub use delete_passenger::{DeletePassengerCommand, DeletePassengerHandler};
pub use queries::AirlineQueries;
pub use update_flight::{UpdateFlightCommand, UpdateFlightHandler};
pub use update_passenger::{UpdatePassengerCommand, UpdatePassengerHandler};
