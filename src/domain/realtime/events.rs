//! Events pushed to connected clients.
//!
//! Every message on the wire has the same envelope:
//!
//! ```json
//! {"type": "seat_locked", "data": {...}, "timestamp": "2025-01-10T12:00:00.000Z"}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::airline::{Flight, Passenger};
use crate::domain::foundation::{ConnectionId, SeatId, Timestamp, UserId};

use super::seat_lock::SeatLock;

/// Closed set of event kinds understood by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Private acknowledgement sent to a new subscriber only.
    ConnectionEstablished,
    PassengerUpdated,
    PassengerCheckedIn,
    SeatChanged,
    PassengerDeleted,
    FlightUpdated,
    SeatLocked,
    SeatUnlocked,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ConnectionEstablished => "connection_established",
            EventKind::PassengerUpdated => "passenger_updated",
            EventKind::PassengerCheckedIn => "passenger_checked_in",
            EventKind::SeatChanged => "seat_changed",
            EventKind::PassengerDeleted => "passenger_deleted",
            EventKind::FlightUpdated => "flight_updated",
            EventKind::SeatLocked => "seat_locked",
            EventKind::SeatUnlocked => "seat_unlocked",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEstablishedData {
    pub connection_id: ConnectionId,
    pub connected_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLockedData {
    pub seat_id: SeatId,
    pub user_id: UserId,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatUnlockedData {
    pub seat_id: SeatId,
    pub user_id: UserId,
}

/// A state change to announce, before it is stamped.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    ConnectionEstablished(ConnectionEstablishedData),
    PassengerUpdated(Passenger),
    PassengerCheckedIn(Passenger),
    SeatChanged(Passenger),
    PassengerDeleted(Passenger),
    FlightUpdated(Flight),
    SeatLocked(SeatLockedData),
    SeatUnlocked(SeatUnlockedData),
}

impl RealtimeEvent {
    pub fn connection_established(connection_id: ConnectionId, connected_at: Timestamp) -> Self {
        RealtimeEvent::ConnectionEstablished(ConnectionEstablishedData {
            connection_id,
            connected_at,
        })
    }

    pub fn seat_locked(lock: &SeatLock) -> Self {
        RealtimeEvent::SeatLocked(SeatLockedData {
            seat_id: lock.seat_id.clone(),
            user_id: lock.holder.clone(),
            expires_at: lock.expires_at,
        })
    }

    pub fn seat_unlocked(lock: &SeatLock) -> Self {
        RealtimeEvent::SeatUnlocked(SeatUnlockedData {
            seat_id: lock.seat_id.clone(),
            user_id: lock.holder.clone(),
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            RealtimeEvent::ConnectionEstablished(_) => EventKind::ConnectionEstablished,
            RealtimeEvent::PassengerUpdated(_) => EventKind::PassengerUpdated,
            RealtimeEvent::PassengerCheckedIn(_) => EventKind::PassengerCheckedIn,
            RealtimeEvent::SeatChanged(_) => EventKind::SeatChanged,
            RealtimeEvent::PassengerDeleted(_) => EventKind::PassengerDeleted,
            RealtimeEvent::FlightUpdated(_) => EventKind::FlightUpdated,
            RealtimeEvent::SeatLocked(_) => EventKind::SeatLocked,
            RealtimeEvent::SeatUnlocked(_) => EventKind::SeatUnlocked,
        }
    }

    fn data(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            RealtimeEvent::ConnectionEstablished(data) => serde_json::to_value(data),
            RealtimeEvent::PassengerUpdated(passenger)
            | RealtimeEvent::PassengerCheckedIn(passenger)
            | RealtimeEvent::SeatChanged(passenger)
            | RealtimeEvent::PassengerDeleted(passenger) => serde_json::to_value(passenger),
            RealtimeEvent::FlightUpdated(flight) => serde_json::to_value(flight),
            RealtimeEvent::SeatLocked(data) => serde_json::to_value(data),
            RealtimeEvent::SeatUnlocked(data) => serde_json::to_value(data),
        }
    }

    /// Freezes the event into its wire envelope.
    pub fn stamp(&self, timestamp: Timestamp) -> Result<EventMessage, serde_json::Error> {
        Ok(EventMessage {
            kind: self.kind(),
            data: self.data()?,
            timestamp,
        })
    }
}

/// Wire envelope of one delivered event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl EventMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
