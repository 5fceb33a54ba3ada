//! Realtime domain module.
//!
//! The events fanned out to connected clients and the seat locks whose
//! lifecycle those events mirror.

mod events;
mod seat_lock;

pub use events::{
    ConnectionEstablishedData, EventKind, EventMessage, RealtimeEvent, SeatLockedData,
    SeatUnlockedData,
};
pub use seat_lock::{is_expired, SeatLock};
