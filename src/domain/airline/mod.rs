//! Airline domain module.
//!
//! Flights and the passengers booked on them. Every successful mutation is
//! announced to connected clients by the application layer.

mod errors;
mod flight;
mod passenger;

pub use errors::AirlineError;
pub use flight::{Flight, FlightStatus, FlightUpdate, SeatMap};
pub use passenger::{MealPreference, Passenger, PassengerServices, PassengerUpdate};
