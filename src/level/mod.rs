//! Bubble-level control loop.
//!
//! One [`LevelLoop::step`] per frame:
//!
//! 1. consume a button edge and flip vertical tracking
//! 2. read the accelerometer (bounded retry)
//! 3. smooth X/Y and map them to a bubble cursor
//! 4. decide whether the `Level!` label is shown
//! 5. time the work and, at most once per second, build a status report
//! 6. hand the cursor to the display and flush it
//!
//! Hardware is reached only through the collaborator traits below, so the
//! whole step runs on the host in tests. Pacing between steps belongs to
//! the caller.

pub mod smoothing;
pub mod status;
pub mod tilt;

use crate::config::{
    CIRCLE_RADIUS, SENSOR_READ_ATTEMPTS, SMOOTHING_WINDOW, VERTICAL_TRACKING_DEFAULT,
};
use crate::error::{DisplayError, Error, SensorError};
use crate::sensor::Acceleration;
use smoothing::SmoothedSample;
use status::{StatusReport, StatusTimer};
use tilt::{DisplayCursor, TiltState};

// ═══════════════════════════════════════════════════════════════════════════
// Collaborators
// ═══════════════════════════════════════════════════════════════════════════

/// Source of three-axis acceleration in m/s².
pub trait AccelSensor {
    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError>;
}

/// Panel that shows the bubble and label.
///
/// `show` only updates the composed frame; nothing reaches the panel
/// until `flush`.
pub trait LevelView {
    fn show(&mut self, cursor: DisplayCursor, label_visible: bool) -> Result<(), DisplayError>;
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Debounced press edges of the mode button.
pub trait ToggleInput {
    /// Consume at most one pending press. Holding the button yields nothing.
    fn fell(&mut self) -> bool;
}

/// Builds without a mode button.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoToggle;

impl ToggleInput for NoToggle {
    fn fell(&mut self) -> bool {
        false
    }
}

/// Monotonic time source.
pub trait Clock {
    fn now_micros(&self) -> u64;
}

// ═══════════════════════════════════════════════════════════════════════════
// Loop state
// ═══════════════════════════════════════════════════════════════════════════

/// Whether vertical tilt moves the bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlag {
    vertical: bool,
}

impl ModeFlag {
    pub const fn new(vertical: bool) -> Self {
        Self { vertical }
    }

    pub fn toggle(&mut self) {
        self.vertical = !self.vertical;
    }

    pub fn vertical(&self) -> bool {
        self.vertical
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new(VERTICAL_TRACKING_DEFAULT)
    }
}

/// Outcome of one [`LevelLoop::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub cursor: DisplayCursor,
    pub label_visible: bool,
    /// Vertical tracking state used for this frame.
    pub vertical: bool,
    /// The button flipped the mode during this frame.
    pub toggled: bool,
    /// Failed sensor reads before the one that succeeded.
    pub sensor_retries: u8,
    /// Present once per status interval.
    pub status: Option<StatusReport>,
}

/// All state owned by the running level.
pub struct LevelLoop<const N: usize> {
    tilt: TiltState<N>,
    mode: ModeFlag,
    durations: SmoothedSample<N>,
    status: StatusTimer,
}

/// Loop with the configured smoothing window.
pub type BubbleLevel = LevelLoop<SMOOTHING_WINDOW>;

impl<const N: usize> LevelLoop<N> {
    /// Create the loop. `now_us` seeds the status timer, so the first
    /// report comes one interval after start-up.
    pub fn new(now_us: u64) -> Self {
        Self::with_status_timer(StatusTimer::new(now_us))
    }

    pub fn with_status_timer(status: StatusTimer) -> Self {
        Self {
            tilt: TiltState::new(),
            mode: ModeFlag::default(),
            durations: SmoothedSample::new(),
            status,
        }
    }

    pub fn mode(&self) -> ModeFlag {
        self.mode
    }

    pub fn tilt(&self) -> &TiltState<N> {
        &self.tilt
    }

    /// Mean work time per step over the window (µs).
    pub fn avg_loop_us(&self) -> u32 {
        self.durations.average() as u32
    }

    /// Run one frame.
    pub fn step<S, V, T, C>(
        &mut self,
        sensor: &mut S,
        view: &mut V,
        input: &mut T,
        clock: &C,
    ) -> Result<Frame, Error>
    where
        S: AccelSensor,
        V: LevelView,
        T: ToggleInput,
        C: Clock,
    {
        let start_us = clock.now_micros();

        let toggled = input.fell();
        if toggled {
            self.mode.toggle();
        }
        let vertical = self.mode.vertical();

        let (raw, sensor_retries) = read_with_retry(sensor)?;
        let (avg_x, avg_y) = self.tilt.update(raw);
        let cursor = self.tilt.cursor(vertical);
        let label_visible = self.tilt.is_level(vertical);

        let end_us = clock.now_micros();
        self.durations.push(end_us.saturating_sub(start_us) as f32);

        let status = if self.status.should_emit(end_us) {
            Some(StatusReport {
                raw,
                avg_x,
                avg_y,
                circle_y: vertical.then(|| cursor.center().1 - CIRCLE_RADIUS as i32),
                avg_loop_us: self.avg_loop_us(),
            })
        } else {
            None
        };

        view.show(cursor, label_visible)?;
        view.flush()?;

        Ok(Frame {
            cursor,
            label_visible,
            vertical,
            toggled,
            sensor_retries,
            status,
        })
    }
}

/// Read the sensor, retrying transient faults up to the configured
/// attempt budget. Returns the reading and the number of retries spent.
///
/// Every failed attempt is logged at `warn` when defmt is enabled.
fn read_with_retry<S: AccelSensor>(sensor: &mut S) -> Result<(Acceleration, u8), SensorError> {
    let mut retries = 0u8;
    loop {
        match sensor.read_acceleration() {
            Ok(accel) => return Ok((accel, retries)),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Sensor read attempt {}/{} failed: {}",
                    retries + 1,
                    SENSOR_READ_ATTEMPTS,
                    _err
                );
                if retries + 1 >= SENSOR_READ_ATTEMPTS {
                    return Err(SensorError::NotResponding);
                }
                retries += 1;
            }
        }
    }
}
