//! User interface subsystem - OLED display + mode button.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, buffered, flushed once per frame
//! - **Button**: 1 tactile switch with debouncing (toggles vertical tracking)

pub mod buttons;
pub mod display;

use bubble_level::config::BUTTON_QUEUE_DEPTH;
use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Physical button events (after debouncing).
#[derive(Clone, Copy, PartialEq, Eq, Format)]
pub enum ButtonEvent {
    /// Flip vertical tilt tracking on/off.
    ToggleVertical,
}

/// Button task → main loop queue.
pub type ButtonChannel = Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH>;
