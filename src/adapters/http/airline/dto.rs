//! Request and response bodies for flight and passenger endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::airline::{
    Flight, FlightStatus, FlightUpdate, MealPreference, Passenger, PassengerUpdate,
};
use crate::domain::foundation::Timestamp;

/// Body of `PATCH /api/flights/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightRequest {
    /// A blank string clears the gate.
    pub gate: Option<String>,
    pub status: Option<FlightStatus>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl From<UpdateFlightRequest> for FlightUpdate {
    fn from(req: UpdateFlightRequest) -> Self {
        FlightUpdate {
            gate: req.gate,
            status: req.status,
            departure_time: req.departure_time.map(Timestamp::from_datetime),
        }
    }
}

/// Body of `PATCH /api/passengers/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassengerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub meal_preference: Option<MealPreference>,
    /// A blank string clears the note.
    pub special_assistance: Option<String>,
}

impl From<UpdatePassengerRequest> for PassengerUpdate {
    fn from(req: UpdatePassengerRequest) -> Self {
        PassengerUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
            meal_preference: req.meal_preference,
            special_assistance: req.special_assistance,
        }
    }
}

/// Body of `POST /api/passengers/:id/seat`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSeatRequest {
    #[serde(default)]
    pub seat_id: Option<String>,
    /// Agent performing the change; needed to act on a seat they have locked.
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightListResponse {
    pub flights: Vec<Flight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassengerListResponse {
    pub passengers: Vec<Passenger>,
}
