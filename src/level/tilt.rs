//! Smoothed tilt estimate and its mapping onto the screen.
//!
//! The sensor is mounted rotated relative to the panel: the accelerometer
//! Y axis drives horizontal bubble motion and X drives vertical motion.

#[cfg_attr(test, allow(unused_imports))]
use micromath::F32Ext;

use super::smoothing::SmoothedSample;
use crate::config::{HEIGHT, LEVEL_THRESHOLD, PIXELS_PER_MS2, WIDTH};
use crate::sensor::Acceleration;

/// Pixel offset for an averaged acceleration, floored (not truncated).
fn to_pixels(avg: f32) -> i32 {
    (avg * PIXELS_PER_MS2).floor() as i32
}

/// Horizontal bubble offset from centre, driven by the Y channel.
pub fn horizontal_offset(avg_y: f32) -> i32 {
    to_pixels(avg_y)
}

/// Vertical bubble offset from centre, driven by the X channel.
///
/// Always 0 while vertical tracking is off.
pub fn vertical_offset(avg_x: f32, vertical: bool) -> i32 {
    if vertical {
        to_pixels(avg_x)
    } else {
        0
    }
}

/// True when the averaged tilt sits inside the level zone.
///
/// The X channel only counts while vertical tracking is on.
pub fn is_level(avg_x: f32, avg_y: f32, vertical: bool) -> bool {
    let x_ok = !vertical || avg_x.abs() <= LEVEL_THRESHOLD;
    x_ok && avg_y.abs() <= LEVEL_THRESHOLD
}

/// Bubble position for one frame, as an offset from the panel centre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayCursor {
    pub dx: i32,
    pub dy: i32,
}

impl DisplayCursor {
    /// Cursor resting at the centre of the panel.
    pub const fn centered() -> Self {
        Self { dx: 0, dy: 0 }
    }

    /// Map averaged readings to a cursor.
    pub fn from_averages(avg_x: f32, avg_y: f32, vertical: bool) -> Self {
        Self {
            dx: horizontal_offset(avg_y),
            dy: vertical_offset(avg_x, vertical),
        }
    }

    /// Absolute pixel coordinates of the bubble centre.
    pub fn center(&self) -> (i32, i32) {
        ((WIDTH / 2) as i32 + self.dx, (HEIGHT / 2) as i32 + self.dy)
    }
}

/// Moving averages of both tilt channels.
#[derive(Clone, Debug)]
pub struct TiltState<const N: usize> {
    x: SmoothedSample<N>,
    y: SmoothedSample<N>,
    avg_x: f32,
    avg_y: f32,
}

impl<const N: usize> TiltState<N> {
    pub fn new() -> Self {
        Self {
            x: SmoothedSample::new(),
            y: SmoothedSample::new(),
            avg_x: 0.0,
            avg_y: 0.0,
        }
    }

    /// Fold one reading into both windows and return `(avg_x, avg_y)`.
    pub fn update(&mut self, accel: Acceleration) -> (f32, f32) {
        self.avg_x = self.x.push(accel.x);
        self.avg_y = self.y.push(accel.y);
        (self.avg_x, self.avg_y)
    }

    pub fn avg_x(&self) -> f32 {
        self.avg_x
    }

    pub fn avg_y(&self) -> f32 {
        self.avg_y
    }

    /// Bubble position for the current averages.
    pub fn cursor(&self, vertical: bool) -> DisplayCursor {
        DisplayCursor::from_averages(self.avg_x, self.avg_y, vertical)
    }

    /// Whether the current averages count as level.
    pub fn is_level(&self, vertical: bool) -> bool {
        is_level(self.avg_x, self.avg_y, vertical)
    }
}

impl<const N: usize> Default for TiltState<N> {
    fn default() -> Self {
        Self::new()
    }
}
