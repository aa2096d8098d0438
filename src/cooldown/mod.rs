/// In-use error cooldown tracking for block devices
///
/// A storage driver that fails to unstage or detach a device because it is
/// still in use records that error here, then asks before the next attempt
/// whether the device has been failing long enough to justify proceeding.
///
/// ```text
/// mark_error(dev) ──► first error instant kept ──► check_timeout_elapsed(dev)
///                                                        │
///                      forget(dev) ◄── device healthy ◄──┘
/// ```
///
/// # Usage Example
///
/// ```rust
/// use device_cooldown::cooldown::{DeviceErrorTracker, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let tracker = DeviceErrorTracker::with_clock(true, Duration::from_secs(10), clock.clone());
///
/// tracker.mark_error("disk-a");
/// assert!(!tracker.check_timeout_elapsed("disk-a"));
///
/// clock.advance(Duration::from_secs(10));
/// assert!(tracker.check_timeout_elapsed("disk-a"));
///
/// tracker.forget("disk-a");
/// assert!(!tracker.check_timeout_elapsed("disk-a"));
/// ```
pub mod clock;
pub mod gate;
pub mod tracker;


pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{GateDecision, InUseGate};
pub use tracker::DeviceErrorTracker;
