//! Seat lock HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AcquireLockRequest, AcquireLockResponse, LockListResponse, ReleaseLockQuery};
pub use handlers::LockHandlers;
pub use routes::lock_routes;
