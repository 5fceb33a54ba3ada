//! Flight and passenger HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangeSeatRequest, FlightListResponse, PassengerListResponse, UpdateFlightRequest,
    UpdatePassengerRequest,
};
pub use handlers::AirlineHandlers;
pub use routes::{flight_routes, passenger_routes};
