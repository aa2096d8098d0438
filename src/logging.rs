/// Tracing subscriber setup for drivers embedding the tracker
///
/// The tracker itself only emits `tracing` events. Binaries that do not
/// already install a subscriber can call [`init`] once at startup.
use crate::{ConfigError, ConfigResult};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and no directive is given
pub const DEFAULT_FILTER: &str = "device_cooldown=info";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Build the filter: `RUST_LOG` wins, then `directive`, then [`DEFAULT_FILTER`]
pub fn env_filter(directive: Option<&str>) -> ConfigResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive.unwrap_or(DEFAULT_FILTER))
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Install a global fmt subscriber
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init(directive: Option<&str>, format: LogFormat) -> ConfigResult<()> {
    let filter = env_filter(directive)?;

    let result = match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| ConfigError::Logging(e.to_string()))
}
