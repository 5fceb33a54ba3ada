//! HTTP adapters - REST API, event stream and router assembly.
//!
//! - `events` - Server-Sent Events subscription
//! - `locks` - Seat lock endpoints
//! - `airline` - Flight and passenger endpoints
//! - `health` - Liveness
//! - `router` - Route tree and middleware stack

pub mod airline;
pub mod error;
pub mod events;
pub mod health;
pub mod locks;
pub mod router;

// Re-export key types for convenience
pub use error::ErrorResponse;
pub use events::{EventStreamState, SubscribeQuery};
pub use router::{api_router, build_cors_layer, with_middleware, ApiDependencies, StreamSettings};
