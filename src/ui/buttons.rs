//! GPIO button input with async debouncing.
//!
//! One physical button (active-low with internal pull-up) toggles
//! vertical tracking. [`toggle_button_task`] turns debounced presses into
//! queued events; the main loop drains at most one per frame through
//! [`ButtonEdges`].

use crate::ui::ButtonEvent;
use bubble_level::config::{BUTTON_DEBOUNCE_MS, BUTTON_QUEUE_DEPTH};
use bubble_level::level::ToggleInput;
use defmt::{info, warn};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::{Duration, Timer};

/// Watch the mode button and queue one `ToggleVertical` per press.
///
/// A press counts only if the pin still reads low after the debounce
/// delay. The task then blocks until release so a held button toggles
/// once. Presses beyond the queue depth are dropped, since the main loop
/// consumes at most one per frame.
pub async fn toggle_button_task(
    pin: AnyPin,
    tx: &Sender<'static, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH>,
) -> ! {
    let debounce = Duration::from_millis(BUTTON_DEBOUNCE_MS);
    let mut button = Input::new(pin, Pull::Up);

    loop {
        button.wait_for_low().await;
        Timer::after(debounce).await;
        if button.is_high() {
            continue;
        }

        match tx.try_send(ButtonEvent::ToggleVertical) {
            Ok(()) => info!("Vertical tracking toggle requested"),
            Err(_) => warn!("Toggle queue full, press dropped"),
        }

        button.wait_for_high().await;
        Timer::after(debounce).await;
    }
}

/// Main-loop side of the button channel.
pub struct ButtonEdges {
    rx: Receiver<'static, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH>,
}

impl ButtonEdges {
    pub fn new(
        rx: Receiver<'static, CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_DEPTH>,
    ) -> Self {
        Self { rx }
    }
}

impl ToggleInput for ButtonEdges {
    fn fell(&mut self) -> bool {
        matches!(self.rx.try_receive(), Ok(ButtonEvent::ToggleVertical))
    }
}
