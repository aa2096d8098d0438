/// Unstage gate - decides whether a device-in-use condition blocks an operation
///
/// Encodes how a node driver consults the tracker while unstaging a volume:
/// a device that is no longer in use clears its record. A device that is
/// still in use first has its earlier error checked: once that error is a full
/// cooldown old the operation proceeds anyway, otherwise the error is recorded
/// and the operation is blocked.
use super::clock::{Clock, SystemClock};
use super::tracker::DeviceErrorTracker;
use crate::{GateError, GateResult};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of an unstage gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Device is not in use
    Proceed,

    /// Device is still in use but has been failing for at least one cooldown
    ProceedAfterCooldown,
}

/// Gate over a shared device error tracker
#[derive(Debug, Clone)]
pub struct InUseGate<C: Clock = SystemClock> {
    tracker: Arc<DeviceErrorTracker<C>>,
}

impl<C: Clock> InUseGate<C> {
    pub fn new(tracker: Arc<DeviceErrorTracker<C>>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<DeviceErrorTracker<C>> {
        &self.tracker
    }

    /// Evaluate an operation against `device` given whether it is currently in use.
    ///
    /// With a disabled tracker an in-use device always blocks.
    pub fn evaluate(&self, device: &str, in_use: bool) -> GateResult<GateDecision> {
        if !in_use {
            self.tracker.forget(device);
            return Ok(GateDecision::Proceed);
        }

        // The cooldown is measured from an earlier failed attempt, never this one
        if self.tracker.check_timeout_elapsed(device) {
            tracing::warn!(
                device,
                cooldown = %humantime::format_duration(self.tracker.cooldown()),
                "Device still in use after cooldown, proceeding"
            );
            return Ok(GateDecision::ProceedAfterCooldown);
        }

        self.tracker.mark_error(device);
        let cooldown = self.tracker.cooldown();
        let elapsed = self
            .tracker
            .remaining(device)
            .map(|left| cooldown.saturating_sub(left))
            .unwrap_or(Duration::ZERO);

        Err(GateError::DeviceInUse {
            device: device.to_string(),
            elapsed,
            cooldown,
        })
    }

    /// Clear the record for `device` after the operation succeeded
    pub fn complete(&self, device: &str) {
        self.tracker.forget(device);
    }
}
