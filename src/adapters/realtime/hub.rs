//! Explicit application context for the realtime core.
//!
//! One hub is built at startup and handed to every consumer. Teardown stops
//! the expiry sweeper so the process can exit cleanly.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::RealtimeConfig;
use crate::ports::Clock;

use super::broadcaster::EventBroadcaster;
use super::sweeper::{ExpirySweeper, SweeperHandle};

/// Owns the broadcaster and its background sweeper.
#[derive(Debug)]
pub struct RealtimeHub {
    broadcaster: Arc<EventBroadcaster>,
    sweeper: Mutex<Option<SweeperHandle>>,
}

impl RealtimeHub {
    /// Builds the broadcaster and starts the sweeper on the current runtime.
    pub fn start(config: &RealtimeConfig, clock: Arc<dyn Clock>) -> Self {
        let broadcaster = Arc::new(EventBroadcaster::new(config.lock_duration(), clock));
        let sweeper = ExpirySweeper::new(Arc::clone(&broadcaster), config.sweep_interval()).spawn();

        tracing::info!(
            lock_duration_ms = config.lock_duration_ms,
            sweep_interval_ms = config.sweep_interval_ms,
            "Realtime hub started"
        );

        Self {
            broadcaster,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    pub fn broadcaster(&self) -> Arc<EventBroadcaster> {
        Arc::clone(&self.broadcaster)
    }

    /// Stops the sweeper. Calling it again does nothing.
    pub async fn shutdown(&self) {
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            handle.shutdown().await;
            tracing::info!("Realtime hub stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
