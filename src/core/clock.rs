//! Monotonic frame clock

use bevy::prelude::*;
use std::time::Instant;

/// Monotonic time source producing per-frame deltas in seconds.
///
/// `reset` re-anchors the clock to "now" so the next `tick` returns ≈ 0;
/// the animation controls call it when resuming from a pause so the paused
/// interval contributes no motion.
#[derive(Resource)]
pub struct SimClock {
    last: Instant,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl SimClock {
    /// Seconds elapsed since the previous tick (or reset). Never negative;
    /// a non-monotonic reading from the OS clamps to zero.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}
