//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and layout
//! constants live here so they can be tuned in one place.

// Display geometry

/// OLED panel width (pixels).
pub const WIDTH: u32 = 128;

/// OLED panel height (pixels).
pub const HEIGHT: u32 = 64;

/// Width of the white frame around the playfield (pixels).
pub const BORDER: u32 = 3;

/// Radius of both the target circle and the bubble (pixels).
pub const CIRCLE_RADIUS: u32 = 15;

/// Outline stroke of both circles (pixels).
pub const CIRCLE_STROKE: u32 = 2;

/// Text shown while the device is level.
pub const LEVEL_LABEL: &str = "Level!";

/// Distance from the bottom edge to the label's baseline anchor (pixels).
pub const LABEL_BOTTOM_MARGIN: u32 = 10;

// Tilt processing

/// Number of samples in every moving-average window.
pub const SMOOTHING_WINDOW: usize = 20;

/// Pixels of circle travel per m/s² of averaged acceleration.
pub const PIXELS_PER_MS2: f32 = 20.0;

/// Largest averaged |acceleration| (m/s²) still treated as level.
pub const LEVEL_THRESHOLD: f32 = 0.05;

/// Vertical tracking state at boot.
pub const VERTICAL_TRACKING_DEFAULT: bool = false;

// Timing

/// Target loop rate (iterations per second).
pub const FRAME_RATE_HZ: u64 = 60;

/// Nominal frame period (µs). 16 666 µs ≈ 1/60 s.
pub const FRAME_PERIOD_US: u64 = 1_000_000 / FRAME_RATE_HZ;

/// Minimum spacing between two status lines (µs).
pub const STATUS_INTERVAL_US: u64 = 1_000_000;

/// How the main loop waits between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pacing {
    /// Sleep one full period after the work is done (rate drops under load).
    FixedSleep,
    /// Wake on a fixed deadline grid (no cumulative drift).
    Deadline,
}

/// Frame pacing used by the firmware main loop.
pub const FRAME_PACING: Pacing = Pacing::FixedSleep;

// Sensor (MPU6050)

/// MPU6050 I²C address (AD0 low).
pub const MPU6050_ADDRESS: u8 = 0x68;

/// Expected `WHO_AM_I` register contents.
pub const MPU6050_WHO_AM_I: u8 = 0x68;

/// Read attempts per frame before a sensor fault becomes fatal.
pub const SENSOR_READ_ATTEMPTS: u8 = 3;

/// Standard gravity (m/s²) used to scale raw accelerometer counts.
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Raw counts per g at the ±2 g full-scale range.
pub const ACCEL_LSB_PER_G: f32 = 16_384.0;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` pins are
// picked in `main.rs`.  Adjust for your custom PCB.
//
//   Button TOGGLE  → P0.11
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27  (shared by MPU6050 + SSD1306, 400 kHz)

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Capacity of the button → main loop event channel.
pub const BUTTON_QUEUE_DEPTH: usize = 4;
