//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod airline;

pub use airline::{
    AirlineQueries, ChangeSeatCommand, ChangeSeatHandler, CheckInPassengerCommand,
    CheckInPassengerHandler, DeletePassengerCommand, DeletePassengerHandler, UpdateFlightCommand,
    UpdateFlightHandler, UpdatePassengerCommand, UpdatePassengerHandler,
};
