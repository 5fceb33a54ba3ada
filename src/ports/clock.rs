//! Clock port - source of "now" for lock expiry and event stamps.
//!
//! Injected so lock expiry can be tested against virtual time.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
