//! Throttled diagnostic reporting.

use crate::config::STATUS_INTERVAL_US;
use crate::sensor::Acceleration;

/// Rate limiter for status lines, driven by a monotonic µs clock.
#[derive(Clone, Copy, Debug)]
pub struct StatusTimer {
    last_emit_us: u64,
    interval_us: u64,
}

impl StatusTimer {
    /// Start a timer whose first emission is one interval after `now_us`.
    pub const fn new(now_us: u64) -> Self {
        Self::with_interval(now_us, STATUS_INTERVAL_US)
    }

    pub const fn with_interval(now_us: u64, interval_us: u64) -> Self {
        Self {
            last_emit_us: now_us,
            interval_us,
        }
    }

    /// Returns true (and restarts the interval) once `now_us` is at least
    /// one interval past the previous emission.
    pub fn should_emit(&mut self, now_us: u64) -> bool {
        if now_us.saturating_sub(self.last_emit_us) >= self.interval_us {
            self.last_emit_us = now_us;
            true
        } else {
            false
        }
    }

    pub fn last_emit_us(&self) -> u64 {
        self.last_emit_us
    }
}

/// Snapshot logged once per status interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Latest raw reading (m/s²).
    pub raw: Acceleration,
    pub avg_x: f32,
    pub avg_y: f32,
    /// Top edge of the bubble's bounding box (pixels), only reported while
    /// vertical tracking is on.
    pub circle_y: Option<i32>,
    /// Mean loop work time over the smoothing window (µs).
    pub avg_loop_us: u32,
}
