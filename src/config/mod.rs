//! Application configuration module
//!
//! Two sections, `server` and `realtime`, read from `FLIGHT_DESK__*`
//! environment variables (optionally seeded from a `.env` file).
//!
//! # Example
//!
//! ```no_run
//! use flight_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Seat locks last {:?}", config.realtime.lock_duration());
//! ```

mod error;
mod realtime;
mod server;

pub use error::{ConfigError, ValidationError};
pub use realtime::RealtimeConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Seat lock timings and subscriber buffering
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then `FLIGHT_DESK__<SECTION>__<FIELD>`
    /// variables, e.g. `FLIGHT_DESK__REALTIME__LOCK_DURATION_MS=30000`.
    /// Missing values fall back to defaults; values that do not parse are an
    /// error.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::DotEnv(e.to_string()));
            }
        }

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FLIGHT_DESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// First invalid value found, server section before realtime.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.realtime.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-wide.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "FLIGHT_DESK__SERVER__PORT",
        "FLIGHT_DESK__SERVER__ENVIRONMENT",
        "FLIGHT_DESK__REALTIME__LOCK_DURATION_MS",
        "FLIGHT_DESK__REALTIME__SWEEP_INTERVAL_MS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.realtime, RealtimeConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_realtime_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FLIGHT_DESK__REALTIME__LOCK_DURATION_MS", "45000");
        env::set_var("FLIGHT_DESK__REALTIME__SWEEP_INTERVAL_MS", "2500");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.realtime.lock_duration_ms, 45_000);
        assert_eq!(config.realtime.sweep_interval_ms, 2_500);
    }

    #[test]
    fn test_server_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FLIGHT_DESK__SERVER__PORT", "3000");
        env::set_var("FLIGHT_DESK__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
    }

    #[test]
    fn test_unparseable_value_is_a_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FLIGHT_DESK__REALTIME__LOCK_DURATION_MS", "half a minute");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_zero_lock_duration() {
        let config = AppConfig {
            realtime: RealtimeConfig {
                lock_duration_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidLockDuration));
    }
}
