//! Flight record and its cabin layout.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FlightId, SeatId, Timestamp, ValidationError};

/// Operational status shown on the departures board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    Scheduled,
    Boarding,
    Delayed,
    Departed,
    InFlight,
    Landed,
    Cancelled,
}

/// Seat grid of the aircraft operating a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub rows: u16,
    /// Seat letters in cabin order, e.g. `ABCDEF`.
    pub letters: String,
}

impl SeatMap {
    pub fn new(rows: u16, letters: impl Into<String>) -> Result<Self, ValidationError> {
        let letters = letters.into().to_ascii_uppercase();
        if rows == 0 {
            return Err(ValidationError::out_of_range("rows", 1u16, u16::MAX, rows));
        }
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "letters",
                "expected one or more seat letters",
            ));
        }
        Ok(Self { rows, letters })
    }

    /// Whether the seat exists on this aircraft.
    pub fn contains(&self, seat: &SeatId) -> bool {
        match seat.row_and_letter() {
            Some((row, letter)) => (1..=self.rows).contains(&row) && self.letters.contains(letter),
            None => false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.rows as usize * self.letters.len()
    }
}

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: FlightId,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    pub status: FlightStatus,
    pub seat_map: SeatMap,
}

/// Partial update of the operational fields of a flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightUpdate {
    pub gate: Option<String>,
    pub status: Option<FlightStatus>,
    pub departure_time: Option<Timestamp>,
}

impl FlightUpdate {
    pub fn is_empty(&self) -> bool {
        self.gate.is_none() && self.status.is_none() && self.departure_time.is_none()
    }
}

impl Flight {
    pub fn new(
        flight_number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: Timestamp,
        seat_map: SeatMap,
    ) -> Result<Self, ValidationError> {
        let flight_number = required("flight_number", flight_number.into())?;
        let origin = required("origin", origin.into())?;
        let destination = required("destination", destination.into())?;

        Ok(Self {
            id: FlightId::new(),
            flight_number,
            origin,
            destination,
            departure_time,
            gate: None,
            status: FlightStatus::Scheduled,
            seat_map,
        })
    }

    pub fn with_gate(mut self, gate: impl Into<String>) -> Self {
        self.gate = Some(gate.into());
        self
    }

    /// Applies an update. A blank gate clears the gate assignment.
    pub fn apply(&mut self, update: FlightUpdate) -> Result<(), ValidationError> {
        if update.is_empty() {
            return Err(ValidationError::empty_field("update"));
        }
        if let Some(gate) = update.gate {
            let gate = gate.trim().to_string();
            self.gate = if gate.is_empty() { None } else { Some(gate) };
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(departure_time) = update.departure_time {
            self.departure_time = departure_time;
        }
        Ok(())
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}
