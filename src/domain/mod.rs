//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `airline` - Flights, passengers and their editable fields
//! - `realtime` - Broadcast events and seat locks

pub mod airline;
pub mod foundation;
pub mod realtime;
