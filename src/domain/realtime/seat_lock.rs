//! Time-bounded claim on a single seat.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SeatId, Timestamp, UserId};

/// A seat held by one user until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLock {
    pub seat_id: SeatId,
    #[serde(rename = "userId")]
    pub holder: UserId,
    pub expires_at: Timestamp,
}

impl SeatLock {
    /// Grants a lock running `duration` from `now`.
    pub fn grant(seat_id: SeatId, holder: UserId, now: Timestamp, duration: Duration) -> Self {
        Self {
            seat_id,
            holder,
            expires_at: now.plus(duration),
        }
    }

    /// Restarts the lock window from `now`.
    pub fn refresh(&mut self, now: Timestamp, duration: Duration) {
        self.expires_at = now.plus(duration);
    }

    pub fn is_held_by(&self, user: &UserId) -> bool {
        &self.holder == user
    }
}

/// The only liveness test for locks. Both the lazy check on access and the
/// periodic sweep call this, so they cannot disagree.
///
/// A lock is still alive at exactly `expires_at`.
pub fn is_expired(lock: &SeatLock, now: Timestamp) -> bool {
    now.is_after(&lock.expires_at)
}
