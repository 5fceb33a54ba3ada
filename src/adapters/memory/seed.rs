//! Sample flights and passengers for development and demos.

use chrono::{Duration, Utc};

use crate::domain::airline::{Flight, FlightStatus, MealPreference, Passenger, SeatMap};
use crate::domain::foundation::{SeatId, Timestamp, ValidationError};

/// Builds the demo data set: three flights, a handful of passengers each.
pub fn sample_data() -> Result<(Vec<Flight>, Vec<Passenger>), ValidationError> {
    let now = Utc::now();
    let narrow_body = SeatMap::new(30, "ABCDEF")?;
    let regional = SeatMap::new(18, "ACDF")?;

    let mut boarding = Flight::new(
        "FD101",
        "SFO",
        "SEA",
        Timestamp::from_datetime(now + Duration::minutes(40)),
        narrow_body.clone(),
    )?
    .with_gate("B12");
    boarding.status = FlightStatus::Boarding;

    let mut delayed = Flight::new(
        "FD220",
        "SFO",
        "DEN",
        Timestamp::from_datetime(now + Duration::hours(2)),
        narrow_body,
    )?
    .with_gate("C3");
    delayed.status = FlightStatus::Delayed;

    let scheduled = Flight::new(
        "FD415",
        "SFO",
        "PDX",
        Timestamp::from_datetime(now + Duration::hours(5)),
        regional,
    )?;

    let mut passengers = Vec::new();

    for (first, last, seat) in [
        ("Ada", "Lovelace", "1A"),
        ("Grace", "Hopper", "1B"),
        ("Alan", "Turing", "12C"),
        ("Katherine", "Johnson", "14F"),
    ] {
        passengers.push(Passenger::new(boarding.id, first, last)?.with_seat(SeatId::new(seat)?));
    }

    let mut vegan = Passenger::new(delayed.id, "Edsger", "Dijkstra")?.with_seat(SeatId::new("7D")?);
    vegan.services.meal_preference = Some(MealPreference::Vegan);
    passengers.push(vegan);

    let mut assisted = Passenger::new(delayed.id, "Barbara", "Liskov")?;
    assisted.services.special_assistance = Some("Wheelchair to gate".to_string());
    passengers.push(assisted);

    passengers.push(Passenger::new(scheduled.id, "Donald", "Knuth")?.with_seat(SeatId::new("3A")?));

    Ok((vec![boarding, delayed, scheduled], passengers))
}
