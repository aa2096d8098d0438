/// Tracker fixtures driven by a manual clock
use device_cooldown::cooldown::{DeviceErrorTracker, InUseGate, ManualClock};
use std::sync::Arc;
use std::time::Duration;

/// Enabled tracker over a fresh manual clock
pub fn manual_tracker(cooldown: Duration) -> (Arc<DeviceErrorTracker<ManualClock>>, ManualClock) {
    let clock = ManualClock::new();
    let tracker = DeviceErrorTracker::with_clock(true, cooldown, clock.clone());
    (Arc::new(tracker), clock)
}

/// Unstage gate sharing its tracker with the returned handle
#[allow(dead_code)]
pub fn manual_gate(
    cooldown: Duration,
) -> (
    InUseGate<ManualClock>,
    Arc<DeviceErrorTracker<ManualClock>>,
    ManualClock,
) {
    let (tracker, clock) = manual_tracker(cooldown);
    (InUseGate::new(Arc::clone(&tracker)), tracker, clock)
}
