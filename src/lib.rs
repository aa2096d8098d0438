pub mod cooldown;
pub mod logging;
pub mod settings;

// Re-export the tracker and its configuration for convenience
pub use cooldown::{DeviceErrorTracker, GateDecision, InUseGate};
pub use settings::{CooldownArgs, CooldownConfig};

use std::time::Duration;
use thiserror::Error;

// Errors raised while building tracker configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid device in-use timeout {value:?}: {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// Errors returned by the unstage gate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Device {device} is still in use ({elapsed:?} of {cooldown:?} cooldown elapsed)")]
    DeviceInUse {
        device: String,
        elapsed: Duration,
        cooldown: Duration,
    },
}

pub type GateResult<T> = Result<T, GateError>;
