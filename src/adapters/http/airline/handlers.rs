//! HTTP handlers for flight and passenger endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::realtime::EventBroadcaster;
use crate::application::handlers::airline::{
    AirlineQueries, ChangeSeatCommand, ChangeSeatHandler, CheckInPassengerCommand,
    CheckInPassengerHandler, DeletePassengerCommand, DeletePassengerHandler, UpdateFlightCommand,
    UpdateFlightHandler, UpdatePassengerCommand, UpdatePassengerHandler,
};
use crate::domain::airline::AirlineError;
use crate::domain::foundation::{FlightId, PassengerId, SeatId, UserId};
use crate::ports::AirlineRepository;

use super::dto::{
    ChangeSeatRequest, FlightListResponse, PassengerListResponse, UpdateFlightRequest,
    UpdatePassengerRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AirlineHandlers {
    queries: Arc<AirlineQueries>,
    update_flight: Arc<UpdateFlightHandler>,
    update_passenger: Arc<UpdatePassengerHandler>,
    check_in: Arc<CheckInPassengerHandler>,
    change_seat: Arc<ChangeSeatHandler>,
    delete_passenger: Arc<DeletePassengerHandler>,
}

impl AirlineHandlers {
    pub fn new(repository: Arc<dyn AirlineRepository>, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            queries: Arc::new(AirlineQueries::new(repository.clone())),
            update_flight: Arc::new(UpdateFlightHandler::new(
                repository.clone(),
                broadcaster.clone(),
            )),
            update_passenger: Arc::new(UpdatePassengerHandler::new(
                repository.clone(),
                broadcaster.clone(),
            )),
            check_in: Arc::new(CheckInPassengerHandler::new(
                repository.clone(),
                broadcaster.clone(),
            )),
            change_seat: Arc::new(ChangeSeatHandler::new(
                repository.clone(),
                broadcaster.clone(),
            )),
            delete_passenger: Arc::new(DeletePassengerHandler::new(repository, broadcaster)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Flight handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/flights - List flights by departure
pub async fn list_flights(State(handlers): State<AirlineHandlers>) -> Response {
    match handlers.queries.list_flights().await {
        Ok(flights) => (StatusCode::OK, Json(FlightListResponse { flights })).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// GET /api/flights/:id - Get flight details
pub async fn get_flight(
    State(handlers): State<AirlineHandlers>,
    Path(flight_id): Path<String>,
) -> Response {
    let flight_id = match flight_id.parse::<FlightId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("flight"),
    };

    match handlers.queries.get_flight(flight_id).await {
        Ok(flight) => (StatusCode::OK, Json(flight)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// PATCH /api/flights/:id - Update gate, status or departure time
pub async fn update_flight(
    State(handlers): State<AirlineHandlers>,
    Path(flight_id): Path<String>,
    Json(req): Json<UpdateFlightRequest>,
) -> Response {
    let flight_id = match flight_id.parse::<FlightId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("flight"),
    };

    let cmd = UpdateFlightCommand {
        flight_id,
        update: req.into(),
    };

    match handlers.update_flight.handle(cmd).await {
        Ok(flight) => (StatusCode::OK, Json(flight)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// GET /api/flights/:id/passengers - List passengers on a flight
pub async fn list_passengers(
    State(handlers): State<AirlineHandlers>,
    Path(flight_id): Path<String>,
) -> Response {
    let flight_id = match flight_id.parse::<FlightId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("flight"),
    };

    match handlers.queries.list_passengers(flight_id).await {
        Ok(passengers) => {
            (StatusCode::OK, Json(PassengerListResponse { passengers })).into_response()
        }
        Err(e) => handle_airline_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Passenger handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/passengers/:id - Get passenger details
pub async fn get_passenger(
    State(handlers): State<AirlineHandlers>,
    Path(passenger_id): Path<String>,
) -> Response {
    let passenger_id = match passenger_id.parse::<PassengerId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("passenger"),
    };

    match handlers.queries.get_passenger(passenger_id).await {
        Ok(passenger) => (StatusCode::OK, Json(passenger)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// PATCH /api/passengers/:id - Edit passenger details and services
pub async fn update_passenger(
    State(handlers): State<AirlineHandlers>,
    Path(passenger_id): Path<String>,
    Json(req): Json<UpdatePassengerRequest>,
) -> Response {
    let passenger_id = match passenger_id.parse::<PassengerId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("passenger"),
    };

    let cmd = UpdatePassengerCommand {
        passenger_id,
        update: req.into(),
    };

    match handlers.update_passenger.handle(cmd).await {
        Ok(passenger) => (StatusCode::OK, Json(passenger)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// POST /api/passengers/:id/check-in - Toggle check-in
pub async fn check_in_passenger(
    State(handlers): State<AirlineHandlers>,
    Path(passenger_id): Path<String>,
) -> Response {
    let passenger_id = match passenger_id.parse::<PassengerId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("passenger"),
    };

    match handlers
        .check_in
        .handle(CheckInPassengerCommand { passenger_id })
        .await
    {
        Ok(passenger) => (StatusCode::OK, Json(passenger)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// POST /api/passengers/:id/seat - Move passenger to another seat
pub async fn change_seat(
    State(handlers): State<AirlineHandlers>,
    Path(passenger_id): Path<String>,
    Json(req): Json<ChangeSeatRequest>,
) -> Response {
    let passenger_id = match passenger_id.parse::<PassengerId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("passenger"),
    };

    let seat = match SeatId::new(req.seat_id.unwrap_or_default()) {
        Ok(seat) => seat,
        Err(e) => {
            return ErrorResponse::bad_request(e.to_string())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };
    let user_id = req
        .user_id
        .as_deref()
        .and_then(|raw| UserId::new(raw.trim()).ok());

    let cmd = ChangeSeatCommand {
        passenger_id,
        seat,
        user_id,
    };

    match handlers.change_seat.handle(cmd).await {
        Ok(passenger) => (StatusCode::OK, Json(passenger)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

/// DELETE /api/passengers/:id - Remove a passenger
pub async fn delete_passenger(
    State(handlers): State<AirlineHandlers>,
    Path(passenger_id): Path<String>,
) -> Response {
    let passenger_id = match passenger_id.parse::<PassengerId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("passenger"),
    };

    match handlers
        .delete_passenger
        .handle(DeletePassengerCommand { passenger_id })
        .await
    {
        Ok(passenger) => (StatusCode::OK, Json(passenger)).into_response(),
        Err(e) => handle_airline_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_id(kind: &str) -> Response {
    ErrorResponse::bad_request(format!("Invalid {} ID", kind))
        .into_response_with(StatusCode::BAD_REQUEST)
}

fn handle_airline_error(error: AirlineError) -> Response {
    let code = error.code().to_string();
    let message = error.message();

    match error {
        AirlineError::FlightNotFound(id) => {
            ErrorResponse::not_found("Flight", &id.to_string()).into_response_with(StatusCode::NOT_FOUND)
        }
        AirlineError::PassengerNotFound(id) => {
            ErrorResponse::not_found("Passenger", &id.to_string())
                .into_response_with(StatusCode::NOT_FOUND)
        }
        AirlineError::SeatOccupied { passenger_id, .. } => ErrorResponse::conflict(code, message)
            .with_details(json!({ "passengerId": passenger_id }))
            .into_response_with(StatusCode::CONFLICT),
        AirlineError::SeatLocked { holder, .. } => ErrorResponse::conflict(code, message)
            .with_details(json!({ "lockedBy": holder }))
            .into_response_with(StatusCode::CONFLICT),
        AirlineError::SeatOutsideCabin(_) => {
            ErrorResponse::conflict(code, message).into_response_with(StatusCode::BAD_REQUEST)
        }
        AirlineError::ValidationFailed { .. } => {
            ErrorResponse::bad_request(message).into_response_with(StatusCode::BAD_REQUEST)
        }
        AirlineError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Airline storage failure");
            ErrorResponse::internal("Internal server error")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
