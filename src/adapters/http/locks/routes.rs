//! HTTP routes for seat lock endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{acquire_lock, list_locks, release_lock, LockHandlers};

/// Creates the seat lock router with all endpoints.
pub fn lock_routes(handlers: LockHandlers) -> Router {
    Router::new()
        .route("/", get(list_locks).post(acquire_lock))
        .route("/:seat_id", delete(release_lock))
        .with_state(handlers)
}
