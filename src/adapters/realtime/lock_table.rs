//! In-memory seat lock table.
//!
//! Per seat the state machine is:
//!
//! ```text
//!            acquire(any)                 release(holder) / expiry
//! UNLOCKED ───────────────▶ LOCKED(h, e) ─────────────────────────▶ UNLOCKED
//!                            │      ▲
//!                            └──────┘ acquire(h): e = now + duration
//! ```
//!
//! An acquire by a different holder fails while `e` is in the future; once
//! it has passed the stale lock is discarded and the new holder wins.
//!
//! The table never broadcasts. Every method returns the locks whose state it
//! changed so the broadcaster can announce them after the table mutex has
//! been released.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::foundation::{SeatId, Timestamp, UserId};
use crate::domain::realtime::{is_expired, SeatLock};

/// Result of an acquire attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The seat was free (or its lock had expired) and now belongs to the caller.
    Granted(SeatLock),
    /// The caller already held the seat; expiry was pushed out.
    Refreshed(SeatLock),
    /// Someone else holds a live lock on the seat.
    Denied(SeatLock),
}

impl AcquireOutcome {
    pub fn is_granted(&self) -> bool {
        !matches!(self, AcquireOutcome::Denied(_))
    }

    /// The lock now on the seat, whoever holds it.
    pub fn lock(&self) -> &SeatLock {
        match self {
            AcquireOutcome::Granted(lock)
            | AcquireOutcome::Refreshed(lock)
            | AcquireOutcome::Denied(lock) => lock,
        }
    }
}

/// What an acquire did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Acquisition {
    pub outcome: AcquireOutcome,
    /// Expired lock that was discarded to make room, if any.
    pub expired: Option<SeatLock>,
}

/// Live locks plus the expired ones evicted while collecting them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LockScan {
    pub active: Vec<SeatLock>,
    pub evicted: Vec<SeatLock>,
}

/// Mutual exclusion map from seat to holder.
///
/// One mutex guards the whole map so check-and-set on a seat is atomic:
/// two racing first acquires on a fresh seat resolve to exactly one grant.
#[derive(Debug)]
pub(crate) struct SeatLockTable {
    locks: Mutex<HashMap<SeatId, SeatLock>>,
    duration: Duration,
}

impl SeatLockTable {
    pub fn new(duration: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn acquire(&self, seat_id: SeatId, holder: UserId, now: Timestamp) -> Acquisition {
        let mut locks = self.locks();

        let stale = locks
            .get(&seat_id)
            .is_some_and(|current| is_expired(current, now));
        let expired = if stale { locks.remove(&seat_id) } else { None };

        let outcome = match locks.get_mut(&seat_id) {
            Some(current) if current.is_held_by(&holder) => {
                current.refresh(now, self.duration);
                AcquireOutcome::Refreshed(current.clone())
            }
            Some(current) => AcquireOutcome::Denied(current.clone()),
            None => {
                let lock = SeatLock::grant(seat_id.clone(), holder, now, self.duration);
                locks.insert(seat_id, lock.clone());
                AcquireOutcome::Granted(lock)
            }
        };

        Acquisition { outcome, expired }
    }

    /// Releases the seat if `holder` owns it. Anyone else gets `None` and
    /// the lock stays put.
    pub fn release(&self, seat_id: &SeatId, holder: &UserId) -> Option<SeatLock> {
        let mut locks = self.locks();
        let owned = locks
            .get(seat_id)
            .is_some_and(|current| current.is_held_by(holder));
        if owned {
            locks.remove(seat_id)
        } else {
            None
        }
    }

    /// Drops every lock held by `holder`, expired or not.
    pub fn release_all_for(&self, holder: &UserId) -> Vec<SeatLock> {
        let mut locks = self.locks();
        let seats: Vec<SeatId> = locks
            .values()
            .filter(|lock| lock.is_held_by(holder))
            .map(|lock| lock.seat_id.clone())
            .collect();

        let mut released: Vec<SeatLock> = seats
            .iter()
            .filter_map(|seat| locks.remove(seat))
            .collect();
        released.sort_by(|a, b| a.seat_id.cmp(&b.seat_id));
        released
    }

    /// Current live lock on a seat, evicting it first if it has expired.
    pub fn get(&self, seat_id: &SeatId, now: Timestamp) -> (Option<SeatLock>, Option<SeatLock>) {
        let mut locks = self.locks();
        let current = locks.get(seat_id).cloned();
        match current {
            Some(current) if is_expired(&current, now) => (None, locks.remove(seat_id)),
            current => (current, None),
        }
    }

    /// Every live lock, sorted by seat. Expired entries met on the way are
    /// evicted and reported.
    pub fn scan(&self, now: Timestamp) -> LockScan {
        let mut locks = self.locks();
        let evicted = drain_expired(&mut locks, now);
        let mut active: Vec<SeatLock> = locks.values().cloned().collect();
        active.sort_by(|a, b| a.seat_id.cmp(&b.seat_id));
        LockScan { active, evicted }
    }

    /// Removes every expired lock. Used by the periodic sweep.
    pub fn remove_expired(&self, now: Timestamp) -> Vec<SeatLock> {
        drain_expired(&mut self.locks(), now)
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.locks().len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation is a single map call, so a poisoned map is still usable.
    fn locks(&self) -> MutexGuard<'_, HashMap<SeatId, SeatLock>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn drain_expired(locks: &mut HashMap<SeatId, SeatLock>, now: Timestamp) -> Vec<SeatLock> {
    let seats: Vec<SeatId> = locks
        .values()
        .filter(|lock| is_expired(lock, now))
        .map(|lock| lock.seat_id.clone())
        .collect();

    let mut expired: Vec<SeatLock> = seats
        .iter()
        .filter_map(|seat| locks.remove(seat))
        .collect();
    expired.sort_by(|a, b| a.seat_id.cmp(&b.seat_id));
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const THIRTY_SECS: Duration = Duration::from_secs(30);

    fn seat(s: &str) -> SeatId {
        SeatId::new(s).unwrap()
    }

    fn user(u: &str) -> UserId {
        UserId::new(u).unwrap()
    }

    fn t0() -> Timestamp {
        Timestamp::from_unix_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn first_acquire_is_granted() {
        let table = SeatLockTable::new(THIRTY_SECS);
        let acq = table.acquire(seat("1A"), user("u1"), t0());

        assert!(matches!(acq.outcome, AcquireOutcome::Granted(_)));
        assert_eq!(acq.outcome.lock().expires_at, t0().plus(THIRTY_SECS));
        assert!(acq.expired.is_none());
    }

    #[test]
    fn other_holder_is_denied_while_live() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        let acq = table.acquire(seat("1A"), user("u2"), t0().plus_secs(5));
        assert!(!acq.outcome.is_granted());
        assert_eq!(acq.outcome.lock().holder, user("u1"));
    }

    #[test]
    fn same_holder_refreshes() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        let acq = table.acquire(seat("1A"), user("u1"), t0().plus_secs(20));
        match acq.outcome {
            AcquireOutcome::Refreshed(lock) => {
                assert_eq!(lock.expires_at, t0().plus_secs(50));
            }
            other => panic!("expected refresh, got {:?}", other),
        }
    }

    #[test]
    fn expired_lock_yields_to_new_holder() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        let acq = table.acquire(seat("1A"), user("u2"), t0().plus_secs(31));
        assert!(matches!(acq.outcome, AcquireOutcome::Granted(ref l) if l.holder == user("u2")));
        assert_eq!(acq.expired.map(|l| l.holder), Some(user("u1")));
    }

    #[test]
    fn lock_is_still_held_at_exact_expiry() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        let acq = table.acquire(seat("1A"), user("u2"), t0().plus(THIRTY_SECS));
        assert!(!acq.outcome.is_granted());
    }

    #[test]
    fn release_by_non_holder_is_ignored() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        assert!(table.release(&seat("1A"), &user("u2")).is_none());
        let scan = table.scan(t0());
        assert_eq!(scan.active.len(), 1);
        assert_eq!(scan.active[0].holder, user("u1"));
    }

    #[test]
    fn release_by_holder_frees_seat() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        assert!(table.release(&seat("1A"), &user("u1")).is_some());
        assert!(table.is_empty());
        assert!(table.release(&seat("1A"), &user("u1")).is_none());
    }

    #[test]
    fn release_all_for_only_touches_that_holder() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("3C"), user("u1"), t0());
        table.acquire(seat("2B"), user("u1"), t0());
        table.acquire(seat("4D"), user("u2"), t0());

        let released = table.release_all_for(&user("u1"));
        let seats: Vec<_> = released.iter().map(|l| l.seat_id.as_str()).collect();
        assert_eq!(seats, vec!["2B", "3C"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn scan_evicts_expired_and_sorts_live() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("9F"), user("u1"), t0());
        table.acquire(seat("1A"), user("u2"), t0().plus_secs(20));
        table.acquire(seat("5C"), user("u3"), t0().plus_secs(20));

        let scan = table.scan(t0().plus_secs(40));
        let live: Vec<_> = scan.active.iter().map(|l| l.seat_id.as_str()).collect();
        assert_eq!(live, vec!["1A", "5C"]);
        assert_eq!(scan.evicted.len(), 1);
        assert_eq!(scan.evicted[0].seat_id, seat("9F"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn get_evicts_lazily() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());

        let (live, evicted) = table.get(&seat("1A"), t0().plus_secs(10));
        assert!(live.is_some());
        assert!(evicted.is_none());

        let (live, evicted) = table.get(&seat("1A"), t0().plus_secs(31));
        assert!(live.is_none());
        assert!(evicted.is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn remove_expired_keeps_live_locks() {
        let table = SeatLockTable::new(THIRTY_SECS);
        table.acquire(seat("1A"), user("u1"), t0());
        table.acquire(seat("1B"), user("u1"), t0().plus_secs(15));

        let expired = table.remove_expired(t0().plus_secs(35));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].seat_id, seat("1A"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn racing_first_acquires_grant_exactly_one() {
        let table = Arc::new(SeatLockTable::new(THIRTY_SECS));
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    table
                        .acquire(seat("7E"), user(&format!("u{}", i)), t0())
                        .outcome
                        .is_granted()
                })
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|granted| *granted)
            .count();
        assert_eq!(granted, 1);
    }
}
