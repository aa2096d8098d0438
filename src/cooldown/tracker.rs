/// Device in-use error tracker with a per-device cooldown window
///
/// Records the first time a device reported an "in-use" error and answers
/// whether the cooldown since that error has elapsed. Entries live until the
/// caller forgets them; nothing here expires them on its own.
use super::clock::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Tracks in-use errors per device under one exclusive lock
#[derive(Debug)]
pub struct DeviceErrorTracker<C: Clock = SystemClock> {
    /// When false, every operation is a no-op
    enabled: bool,

    /// Minimum time after the first error before a retry is considered
    cooldown: Duration,

    /// Time source for recording and checking errors
    clock: C,

    /// First recorded error instant per device identifier
    errors: Mutex<HashMap<String, Instant>>,
}

impl DeviceErrorTracker<SystemClock> {
    /// Create a tracker backed by the system monotonic clock
    pub fn new(enabled: bool, cooldown: Duration) -> Self {
        Self::with_clock(enabled, cooldown, SystemClock)
    }
}

impl<C: Clock> DeviceErrorTracker<C> {
    /// Create a tracker over a custom clock
    pub fn with_clock(enabled: bool, cooldown: Duration, clock: C) -> Self {
        Self {
            enabled,
            cooldown,
            clock,
            errors: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns true if an error was recorded for `device` at least `cooldown` ago.
    ///
    /// A disabled tracker always returns false.
    pub fn check_timeout_elapsed(&self, device: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let errors = self.lock();
        match errors.get(device) {
            Some(first_error) => self.elapsed_since(*first_error) >= self.cooldown,
            None => false,
        }
    }

    /// Record an in-use error for `device` at the current time.
    ///
    /// An earlier error that is still tracked is kept as is, so repeated
    /// failures never push the cooldown window forward.
    pub fn mark_error(&self, device: &str) {
        if !self.enabled {
            return;
        }

        {
            let mut errors = self.lock();
            if errors.contains_key(device) {
                return;
            }
            errors.insert(device.to_string(), self.clock.now());
        }

        // Logged after the guard is released
        tracing::debug!(
            device,
            recorded_at = %chrono::Utc::now().to_rfc3339(),
            "Recorded in-use error for device"
        );
    }

    /// Stop tracking `device`. Unknown devices are ignored.
    pub fn forget(&self, device: &str) {
        if !self.enabled {
            return;
        }

        let removed = self.lock().remove(device).is_some();
        if removed {
            tracing::trace!(device, "Cleared in-use error for device");
        }
    }

    /// Instant of the first tracked error for `device`
    pub fn first_error_at(&self, device: &str) -> Option<Instant> {
        if !self.enabled {
            return None;
        }
        self.lock().get(device).copied()
    }

    /// Time left before the cooldown for `device` elapses.
    ///
    /// `Some(Duration::ZERO)` once elapsed, `None` when the device is not tracked.
    pub fn remaining(&self, device: &str) -> Option<Duration> {
        let first_error = self.first_error_at(device)?;
        Some(self.cooldown.saturating_sub(self.elapsed_since(first_error)))
    }

    /// Sorted identifiers of all currently tracked devices
    pub fn tracked_devices(&self) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }
        let mut devices: Vec<String> = self.lock().keys().cloned().collect();
        devices.sort();
        devices
    }

    pub fn len(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn elapsed_since(&self, first_error: Instant) -> Duration {
        self.clock.now().saturating_duration_since(first_error)
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        matches!(self.errors.try_lock(), Err(std::sync::TryLockError::WouldBlock))
    }

    // Every critical section leaves the map consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
