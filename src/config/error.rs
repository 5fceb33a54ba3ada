//! Configuration error types

use thiserror::Error;

/// Failure to turn the environment into an [`AppConfig`](super::AppConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Could not read .env file: {0}")]
    DotEnv(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that the server cannot run with
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Seat lock duration must be greater than zero")]
    InvalidLockDuration,

    #[error("Expiry sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("Subscriber buffer must hold at least one message")]
    InvalidSinkBuffer,
}
