//! Request and response bodies for the seat lock endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SeatId, Timestamp, UserId};
use crate::domain::realtime::SeatLock;

/// Body of `POST /api/seat-locks`.
///
/// Both fields are optional at the serde level so a missing one is reported
/// as a validation failure rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireLockRequest {
    #[serde(default)]
    pub seat_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query string of `DELETE /api/seat-locks/:seat_id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseLockQuery {
    pub user_id: Option<String>,
}

/// Result of an acquire attempt, granted or not.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireLockResponse {
    pub granted: bool,
    pub seat_id: SeatId,
    /// Current holder: the caller when granted, someone else otherwise.
    pub user_id: UserId,
    pub expires_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl AcquireLockResponse {
    pub fn granted(lock: &SeatLock) -> Self {
        Self {
            granted: true,
            seat_id: lock.seat_id.clone(),
            user_id: lock.holder.clone(),
            expires_at: lock.expires_at,
            code: None,
        }
    }

    pub fn denied(lock: &SeatLock) -> Self {
        Self {
            granted: false,
            seat_id: lock.seat_id.clone(),
            user_id: lock.holder.clone(),
            expires_at: lock.expires_at,
            code: Some("SEAT_LOCKED"),
        }
    }
}

/// Body of `GET /api/seat-locks`.
#[derive(Debug, Clone, Serialize)]
pub struct LockListResponse {
    pub locks: Vec<SeatLock>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn acquire_request_tolerates_missing_fields() {
        let req: AcquireLockRequest = serde_json::from_str(r#"{"seatId":"1A"}"#).unwrap();
        assert_eq!(req.seat_id.as_deref(), Some("1A"));
        assert!(req.user_id.is_none());
    }

    #[test]
    fn denied_response_names_holder_and_code() {
        let lock = SeatLock::grant(
            SeatId::new("1A").unwrap(),
            UserId::new("u1").unwrap(),
            Timestamp::from_unix_millis(0).unwrap(),
            Duration::from_secs(30),
        );
        let json = serde_json::to_value(AcquireLockResponse::denied(&lock)).unwrap();

        assert_eq!(json["granted"], false);
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["code"], "SEAT_LOCKED");

        let json = serde_json::to_value(AcquireLockResponse::granted(&lock)).unwrap();
        assert!(json.get("code").is_none());
    }
}
