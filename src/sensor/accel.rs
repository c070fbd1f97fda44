//! Acceleration readings and raw-count scaling.
//!
//! Register layout (MPU6050, ±2 g full scale):
//! ```text
//! 0x3B..0x40: ACCEL_XOUT_H, ACCEL_XOUT_L, ACCEL_YOUT_H, ... (big endian i16)
//! 16384 counts = 1 g
//! ```

use crate::config::{ACCEL_LSB_PER_G, STANDARD_GRAVITY};

/// Number of bytes in one burst read of the accelerometer registers.
pub const ACCEL_FRAME_SIZE: usize = 6;

/// Three-axis acceleration in m/s².
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Decode a 6-byte `ACCEL_XOUT_H..ACCEL_ZOUT_L` burst.
    pub fn from_register_bytes(data: &[u8; ACCEL_FRAME_SIZE]) -> Self {
        let x = i16::from_be_bytes([data[0], data[1]]);
        let y = i16::from_be_bytes([data[2], data[3]]);
        let z = i16::from_be_bytes([data[4], data[5]]);
        Self {
            x: counts_to_ms2(x),
            y: counts_to_ms2(y),
            z: counts_to_ms2(z),
        }
    }
}

/// Convert a raw ±2 g accelerometer count to m/s².
pub fn counts_to_ms2(raw: i16) -> f32 {
    raw as f32 / ACCEL_LSB_PER_G * STANDARD_GRAVITY
}
