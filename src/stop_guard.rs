//! Stop command spacing.
//!
//! The RX09 drops stop telegrams that arrive too close together, so every stop
//! issued through one controller is scheduled on a single slot: the next
//! instant a stop may reach the wire. Reserving a slot returns the start time
//! for this stop and pushes the slot [`STOP_SPACING`] past it, whichever
//! channel asked.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Minimum time between two stop telegrams of one controller.
pub const STOP_SPACING: Duration = Duration::from_millis(600);

/// Per-controller scheduler for stop commands.
#[derive(Debug, Default)]
pub struct StopGuard {
    next_slot: Mutex<Option<Instant>>,
}

impl StopGuard {
    /// Create a guard with no stop scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next stop slot and return when it opens.
    ///
    /// The slot is rearmed before the caller writes anything, so a failed
    /// write never shortens the spacing for the stops behind it.
    pub fn reserve(&self) -> Instant {
        let now = Instant::now();
        let mut next_slot = self.next_slot.lock();
        let start = next_slot.map_or(now, |slot| slot.max(now));
        *next_slot = Some(start + STOP_SPACING);
        start
    }

    /// The instant the next reserved stop would start, if any stop was issued.
    #[cfg(test)]
    pub(crate) fn next_slot(&self) -> Option<Instant> {
        *self.next_slot.lock()
    }
}
