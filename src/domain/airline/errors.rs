//! Airline-specific error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, FlightId, PassengerId, SeatId, UserId, ValidationError,
};

/// Errors returned by flight and passenger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirlineError {
    /// Flight was not found.
    FlightNotFound(FlightId),
    /// Passenger was not found.
    PassengerNotFound(PassengerId),
    /// Another passenger on the flight already sits there.
    SeatOccupied { seat: SeatId, passenger_id: PassengerId },
    /// Another user is editing the seat.
    SeatLocked { seat: SeatId, holder: UserId },
    /// The seat does not exist on the aircraft.
    SeatOutsideCabin(SeatId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AirlineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AirlineError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AirlineError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AirlineError::FlightNotFound(_) => ErrorCode::FlightNotFound,
            AirlineError::PassengerNotFound(_) => ErrorCode::PassengerNotFound,
            AirlineError::SeatOccupied { .. } => ErrorCode::SeatOccupied,
            AirlineError::SeatLocked { .. } => ErrorCode::SeatLocked,
            AirlineError::SeatOutsideCabin(_) => ErrorCode::SeatOutsideCabin,
            AirlineError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AirlineError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AirlineError::FlightNotFound(id) => format!("Flight not found: {}", id),
            AirlineError::PassengerNotFound(id) => format!("Passenger not found: {}", id),
            AirlineError::SeatOccupied { seat, .. } => {
                format!("Seat {} is already assigned to another passenger", seat)
            }
            AirlineError::SeatLocked { seat, holder } => {
                format!("Seat {} is being edited by {}", seat, holder)
            }
            AirlineError::SeatOutsideCabin(seat) => {
                format!("Seat {} does not exist on this aircraft", seat)
            }
            AirlineError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AirlineError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AirlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AirlineError {}

impl From<ValidationError> for AirlineError {
    fn from(err: ValidationError) -> Self {
        AirlineError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AirlineError {
    fn from(err: DomainError) -> Self {
        AirlineError::Infrastructure(err.to_string())
    }
}
