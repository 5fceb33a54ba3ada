//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EventSink` - Outbound channel of one realtime subscriber
//! - `Clock` - Current time, replaceable in tests
//! - `AirlineRepository` - Flight and passenger storage

mod airline_repository;
mod clock;
mod event_sink;

pub use airline_repository::AirlineRepository;
pub use clock::Clock;
pub use event_sink::{EventSink, SinkClosed};
