//! Error types for the domain layer.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A value rejected while building a domain type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    pub fn out_of_range(
        field: impl Into<String>,
        min: impl Into<i64>,
        max: impl Into<i64>,
        actual: impl Into<i64>,
    ) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: min.into(),
            max: max.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Machine-readable error codes, as they appear in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,

    FlightNotFound,
    PassengerNotFound,

    SeatOccupied,
    SeatLocked,
    SeatOutsideCabin,

    StorageError,
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::FlightNotFound => "FLIGHT_NOT_FOUND",
            ErrorCode::PassengerNotFound => "PASSENGER_NOT_FOUND",
            ErrorCode::SeatOccupied => "SEAT_OCCUPIED",
            ErrorCode::SeatLocked => "SEAT_LOCKED",
            ErrorCode::SeatOutsideCabin => "SEAT_OUTSIDE_CABIN",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ErrorCode::FlightNotFound | ErrorCode::PassengerNotFound)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a repository or other adapter.
///
/// `details` is ordered so that rendered errors are stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::empty_field("seat_id");
        assert_eq!(err.to_string(), "Field 'seat_id' cannot be empty");
        assert_eq!(err.field(), "seat_id");
    }

    #[test]
    fn out_of_range_accepts_narrow_integers() {
        let err = ValidationError::out_of_range("rows", 1u16, u16::MAX, 0u16);
        assert_eq!(
            err.to_string(),
            "Field 'rows' must be between 1 and 65535, got 0"
        );
    }

    #[test]
    fn too_long_reports_the_limit() {
        let err = ValidationError::too_long("first_name", 64);
        assert_eq!(err.to_string(), "Field 'first_name' must be at most 64 characters");
        assert_eq!(err.field(), "first_name");
    }

    #[test]
    fn error_codes_render_screaming_snake_case() {
        assert_eq!(ErrorCode::SeatOutsideCabin.to_string(), "SEAT_OUTSIDE_CABIN");
        assert!(ErrorCode::PassengerNotFound.is_not_found());
        assert!(!ErrorCode::SeatLocked.is_not_found());
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::FlightNotFound, "Flight not found")
            .with_detail("flightId", "abc");
        assert_eq!(err.to_string(), "[FLIGHT_NOT_FOUND] Flight not found");
        assert_eq!(err.details.get("flightId").map(String::as_str), Some("abc"));
    }
}
