/// Cooldown tracker configuration
///
/// Settings come from three places, later ones winning:
/// built-in defaults, an optional TOML/JSON/YAML file, and `DEVICE_COOLDOWN_*`
/// environment variables. Drivers that already parse a command line can
/// flatten [`CooldownArgs`] into their own clap parser instead.
use crate::cooldown::DeviceErrorTracker;
use crate::{ConfigError, ConfigResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Device in-use checks are on unless turned off
pub const DEFAULT_ENABLED: bool = true;

/// Default cooldown before an in-use device is no longer allowed to block
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix for environment overrides (`DEVICE_COOLDOWN_ENABLED`, `DEVICE_COOLDOWN_TIMEOUT`)
pub const ENV_PREFIX: &str = "DEVICE_COOLDOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Track device in-use errors at all
    pub enabled: bool,

    /// Cooldown after the first in-use error
    #[serde(with = "timeout_format")]
    pub timeout: Duration,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CooldownConfig {
    pub fn new(enabled: bool, timeout: Duration) -> Self {
        Self { enabled, timeout }
    }

    /// Load configuration from defaults, an optional file, then the environment
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("enabled", DEFAULT_ENABLED)?
            .set_default(
                "timeout",
                humantime::format_duration(DEFAULT_TIMEOUT).to_string(),
            )?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        tracing::debug!(
            enabled = loaded.enabled,
            timeout = %humantime::format_duration(loaded.timeout),
            "Loaded device cooldown configuration"
        );
        Ok(loaded)
    }

    /// Build a tracker using the system clock
    pub fn build_tracker(&self) -> DeviceErrorTracker {
        DeviceErrorTracker::new(self.enabled, self.timeout)
    }
}

/// Command-line flags for the cooldown tracker, meant to be `#[command(flatten)]`ed
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CooldownArgs {
    /// Block unstage while the device is in use, until the timeout passes
    #[arg(
        long = "enable-device-in-use-check",
        env = "DEVICE_COOLDOWN_ENABLED",
        default_value_t = DEFAULT_ENABLED,
        action = clap::ArgAction::Set
    )]
    pub enabled: bool,

    /// How long a device may stay in use before unstage proceeds anyway (e.g. 30s, 2m)
    #[arg(
        long = "device-in-use-timeout",
        env = "DEVICE_COOLDOWN_TIMEOUT",
        default_value = "30s",
        value_parser = parse_timeout
    )]
    pub timeout: Duration,
}

impl From<CooldownArgs> for CooldownConfig {
    fn from(args: CooldownArgs) -> Self {
        Self::new(args.enabled, args.timeout)
    }
}

/// Parse a timeout given as humantime text ("45s", "1m 30s") or bare seconds ("45")
///
/// Negative values are rejected.
pub fn parse_timeout(value: &str) -> ConfigResult<Duration> {
    let trimmed = value.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(trimmed).map_err(|source| ConfigError::InvalidTimeout {
        value: value.to_string(),
        source,
    })
}

mod timeout_format {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*timeout).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        deserializer.deserialize_any(TimeoutVisitor)
    }

    struct TimeoutVisitor;

    impl<'de> Visitor<'de> for TimeoutVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a duration such as \"30s\" or a whole number of seconds")
        }

        fn visit_u64<E: de::Error>(self, secs: u64) -> Result<Duration, E> {
            Ok(Duration::from_secs(secs))
        }

        fn visit_i64<E: de::Error>(self, secs: i64) -> Result<Duration, E> {
            u64::try_from(secs)
                .map(Duration::from_secs)
                .map_err(|_| E::custom(format!("timeout must not be negative, got {}", secs)))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Duration, E> {
            super::parse_timeout(value).map_err(E::custom)
        }
    }
}
