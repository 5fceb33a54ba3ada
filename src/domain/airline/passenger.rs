//! Passenger record, check-in state and cabin service details.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FlightId, PassengerId, SeatId, Timestamp, ValidationError};

const MAX_NAME_LEN: usize = 64;

/// Meal ordered for the in-flight service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPreference {
    Standard,
    Vegetarian,
    Vegan,
    GlutenFree,
    Halal,
    Kosher,
    Child,
}

/// Cabin crew facing service details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerServices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_preference: Option<MealPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_assistance: Option<String>,
}

/// A passenger booked on a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: PassengerId,
    pub flight_id: FlightId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<SeatId>,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<Timestamp>,
    #[serde(default)]
    pub services: PassengerServices,
}

/// Partial update of the editable passenger fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub meal_preference: Option<MealPreference>,
    /// A blank value clears the assistance note.
    pub special_assistance: Option<String>,
}

impl PassengerUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.meal_preference.is_none()
            && self.special_assistance.is_none()
    }
}

impl Passenger {
    pub fn new(
        flight_id: FlightId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: PassengerId::new(),
            flight_id,
            first_name: name("first_name", first_name.into())?,
            last_name: name("last_name", last_name.into())?,
            seat: None,
            checked_in: false,
            checked_in_at: None,
            services: PassengerServices::default(),
        })
    }

    pub fn with_seat(mut self, seat: SeatId) -> Self {
        self.seat = Some(seat);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Flips the check-in state and returns the new value.
    pub fn toggle_check_in(&mut self, now: Timestamp) -> bool {
        self.checked_in = !self.checked_in;
        self.checked_in_at = if self.checked_in { Some(now) } else { None };
        self.checked_in
    }

    /// Moves the passenger to `seat`, returning the seat they left.
    pub fn assign_seat(&mut self, seat: SeatId) -> Option<SeatId> {
        self.seat.replace(seat)
    }

    pub fn apply(&mut self, update: PassengerUpdate) -> Result<(), ValidationError> {
        if update.is_empty() {
            return Err(ValidationError::empty_field("update"));
        }
        let first_name = update
            .first_name
            .map(|v| name("first_name", v))
            .transpose()?;
        let last_name = update.last_name.map(|v| name("last_name", v)).transpose()?;

        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(meal) = update.meal_preference {
            self.services.meal_preference = Some(meal);
        }
        if let Some(note) = update.special_assistance {
            let note = note.trim().to_string();
            self.services.special_assistance = if note.is_empty() { None } else { Some(note) };
        }
        Ok(())
    }
}

fn name(field: &str, value: String) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::too_long(field, MAX_NAME_LEN));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> Passenger {
        Passenger::new(FlightId::new(), "Ada", "Lovelace").unwrap()
    }

    #[test]
    fn new_passenger_is_not_checked_in() {
        let p = passenger();
        assert!(!p.checked_in);
        assert!(p.checked_in_at.is_none());
        assert_eq!(p.full_name(), "Ada Lovelace");
    }

    #[test]
    fn toggle_check_in_flips_and_stamps() {
        let mut p = passenger();
        let now = Timestamp::now();

        assert!(p.toggle_check_in(now));
        assert_eq!(p.checked_in_at, Some(now));

        assert!(!p.toggle_check_in(now));
        assert!(p.checked_in_at.is_none());
    }

    #[test]
    fn assign_seat_returns_previous_seat() {
        let mut p = passenger().with_seat(SeatId::new("3C").unwrap());
        let previous = p.assign_seat(SeatId::new("4D").unwrap());
        assert_eq!(previous, Some(SeatId::new("3C").unwrap()));
        assert_eq!(p.seat, Some(SeatId::new("4D").unwrap()));
    }

    #[test]
    fn apply_validates_before_mutating() {
        let mut p = passenger();
        let result = p.apply(PassengerUpdate {
            first_name: Some("Grace".to_string()),
            last_name: Some("".to_string()),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("last_name"));
        assert_eq!(p.first_name, "Ada");
    }

    #[test]
    fn apply_sets_and_clears_services() {
        let mut p = passenger();
        p.apply(PassengerUpdate {
            meal_preference: Some(MealPreference::Vegan),
            special_assistance: Some("wheelchair to gate".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.services.meal_preference, Some(MealPreference::Vegan));
        assert_eq!(p.services.special_assistance.as_deref(), Some("wheelchair to gate"));

        p.apply(PassengerUpdate {
            special_assistance: Some(" ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(p.services.special_assistance.is_none());
    }

    #[test]
    fn passenger_serializes_camel_case() {
        let p = passenger().with_seat(SeatId::new("1a").unwrap());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["seat"], "1A");
        assert_eq!(json["checkedIn"], false);
    }
}
