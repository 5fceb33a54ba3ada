//! HTTP handlers for seat lock endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::realtime::{AcquireOutcome, EventBroadcaster};
use crate::domain::foundation::{SeatId, UserId, ValidationError};

use super::dto::{AcquireLockRequest, AcquireLockResponse, LockListResponse, ReleaseLockQuery};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LockHandlers {
    broadcaster: Arc<EventBroadcaster>,
}

impl LockHandlers {
    pub fn new(broadcaster: Arc<EventBroadcaster>) -> Self {
        Self { broadcaster }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/seat-locks - List live locks
pub async fn list_locks(State(handlers): State<LockHandlers>) -> Response {
    let response = LockListResponse {
        locks: handlers.broadcaster.list_locks(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/seat-locks - Acquire or refresh a lock
pub async fn acquire_lock(
    State(handlers): State<LockHandlers>,
    Json(req): Json<AcquireLockRequest>,
) -> Response {
    let (seat_id, user_id) = match parse_lock_target(req.seat_id.as_deref(), req.user_id.as_deref()) {
        Ok(target) => target,
        Err(e) => return validation_error(e),
    };

    match handlers.broadcaster.acquire_lock(seat_id, user_id) {
        AcquireOutcome::Granted(lock) | AcquireOutcome::Refreshed(lock) => {
            (StatusCode::OK, Json(AcquireLockResponse::granted(&lock))).into_response()
        }
        AcquireOutcome::Denied(lock) => {
            (StatusCode::CONFLICT, Json(AcquireLockResponse::denied(&lock))).into_response()
        }
    }
}

/// DELETE /api/seat-locks/:seat_id?userId= - Release a lock
///
/// Always 204 for well-formed requests: releasing a lock you do not hold is
/// not an error.
pub async fn release_lock(
    State(handlers): State<LockHandlers>,
    Path(seat_id): Path<String>,
    Query(query): Query<ReleaseLockQuery>,
) -> Response {
    let (seat_id, user_id) = match parse_lock_target(Some(&seat_id), query.user_id.as_deref()) {
        Ok(target) => target,
        Err(e) => return validation_error(e),
    };

    handlers.broadcaster.release_lock(&seat_id, &user_id);
    StatusCode::NO_CONTENT.into_response()
}

fn parse_lock_target(
    seat_id: Option<&str>,
    user_id: Option<&str>,
) -> Result<(SeatId, UserId), ValidationError> {
    let seat_id = SeatId::new(seat_id.unwrap_or_default())?;
    let user_id = UserId::new(user_id.unwrap_or_default().trim())?;
    Ok((seat_id, user_id))
}

fn validation_error(error: ValidationError) -> Response {
    ErrorResponse::bad_request(error.to_string()).into_response_with(StatusCode::BAD_REQUEST)
}
