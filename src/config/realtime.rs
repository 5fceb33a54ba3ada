//! Realtime hub configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Seat locking and subscriber fan-out settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RealtimeConfig {
    /// How long a granted or refreshed seat lock lives, in milliseconds
    #[serde(default = "default_lock_duration_ms")]
    pub lock_duration_ms: u64,

    /// Period of the background expiry sweep, in milliseconds
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,

    /// Messages queued per subscriber before it is treated as stalled
    #[serde(default = "default_sink_buffer")]
    pub sink_buffer: usize,

    /// SSE keep-alive comment interval in seconds
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

impl RealtimeConfig {
    pub fn lock_duration(&self) -> Duration {
        Duration::from_millis(self.lock_duration_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lock_duration_ms == 0 {
            return Err(ValidationError::InvalidLockDuration);
        }
        if self.sweep_interval_ms == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.sink_buffer == 0 {
            return Err(ValidationError::InvalidSinkBuffer);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            lock_duration_ms: default_lock_duration_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
            sink_buffer: default_sink_buffer(),
            keep_alive_secs: default_keep_alive_secs(),
        }
    }
}

fn default_lock_duration_ms() -> u64 {
    30_000
}

fn default_sweep_interval_ms() -> u64 {
    10_000
}

fn default_sink_buffer() -> usize {
    256
}

fn default_keep_alive_secs() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let config = RealtimeConfig::default();
        assert_eq!(config.lock_duration(), Duration::from_secs(30));
        assert_eq!(config.sweep_interval(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_lock_duration_is_rejected() {
        let config = RealtimeConfig {
            lock_duration_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidLockDuration));
    }

    #[test]
    fn zero_sweep_interval_is_rejected() {
        let config = RealtimeConfig {
            sweep_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSweepInterval));
    }

    #[test]
    fn zero_sink_buffer_is_rejected() {
        let config = RealtimeConfig {
            sink_buffer: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSinkBuffer));
    }
}
