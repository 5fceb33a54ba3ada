//! HTTP routes for flight and passenger endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    change_seat, check_in_passenger, delete_passenger, get_flight, get_passenger, list_flights,
    list_passengers, update_flight, update_passenger, AirlineHandlers,
};

/// Creates the flight router, to be nested at `/api/flights`.
pub fn flight_routes(handlers: AirlineHandlers) -> Router {
    Router::new()
        .route("/", get(list_flights))
        .route("/:id", get(get_flight).patch(update_flight))
        .route("/:id/passengers", get(list_passengers))
        .with_state(handlers)
}

/// Creates the passenger router, to be nested at `/api/passengers`.
pub fn passenger_routes(handlers: AirlineHandlers) -> Router {
    Router::new()
        .route(
            "/:id",
            get(get_passenger)
                .patch(update_passenger)
                .delete(delete_passenger),
        )
        .route("/:id/check-in", post(check_in_passenger))
        .route("/:id/seat", post(change_seat))
        .with_state(handlers)
}
