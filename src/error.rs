//! Unified error type for bubble-level.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Sensor
    /// Accelerometer read failed.
    Sensor(SensorError),

    // UI / Display
    /// Drawing to or flushing the display failed.
    Display(DisplayError),

    // Startup
    /// Hardware did not match the compiled-in configuration.
    Config(ConfigError),
}

/// Accelerometer faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// A single I²C transaction failed. Worth retrying.
    Bus,
    /// Every read attempt in this frame failed.
    NotResponding,
}

/// Display faults. None of these are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Command or flush transaction to the panel failed.
    Bus,
    /// Composing the frame buffer failed.
    Draw,
}

/// Startup configuration mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `WHO_AM_I` returned something other than the expected id.
    UnexpectedDeviceId(u8),
}

// Convenience conversions

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}
