//! ExpirySweeper - Background task that clears abandoned seat locks.
//!
//! Lazy eviction only happens when someone touches a seat. The sweeper
//! covers the rest: on a fixed interval it removes every expired lock and
//! lets the broadcaster announce each `seat_unlocked`.
//!
//! ## Graceful Shutdown
//!
//! The task listens on a watch channel and exits as soon as `true` is sent
//! or the sender is dropped. [`SweeperHandle::shutdown`] does both and
//! waits for the task to finish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::broadcaster::EventBroadcaster;

/// Periodic expiry pass over the seat lock table.
pub struct ExpirySweeper {
    broadcaster: Arc<EventBroadcaster>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(broadcaster: Arc<EventBroadcaster>, interval: Duration) -> Self {
        Self {
            broadcaster,
            interval,
        }
    }

    /// Run the sweep loop until shutdown is signalled.
    ///
    /// The first sweep happens one full interval after start.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Expiry sweeper started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.sweep_once();
                }
            }
        }

        tracing::info!("Expiry sweeper stopped");
    }

    /// Run exactly one sweep. Returns how many locks were removed.
    pub fn sweep_once(&self) -> usize {
        self.broadcaster.sweep_expired()
    }

    /// Spawns the loop on the current runtime.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(rx).await });
        SweeperHandle { shutdown, task }
    }
}

/// Owner of a running sweeper task.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the task to stop and waits for it.
    pub async fn shutdown(self) {
        // The receiver is gone only if the task already ended.
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Expiry sweeper task ended abnormally");
        }
    }
}
