//! In-memory storage adapters.

mod airline_store;
mod seed;

pub use airline_store::InMemoryAirlineStore;
pub use seed::sample_data;
