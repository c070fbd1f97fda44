//! SSD1306 OLED display wrapper.

use bubble_level::error::DisplayError;
use bubble_level::level::tilt::DisplayCursor;
use bubble_level::level::LevelView;
use bubble_level::ui::scene;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral (or a shared-bus device).
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, DisplayError>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| DisplayError::Bus)?;
    display.clear_buffer();
    display.flush().map_err(|_| DisplayError::Bus)?;
    Ok(display)
}

/// Bubble-level view backed by the buffered SSD1306 driver.
///
/// Pixels only go out on [`LevelView::flush`]; `show` just recomposes the
/// RAM buffer.
pub struct LevelScreen<I2C> {
    display: Display<I2C>,
}

impl<I2C> LevelScreen<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self { display }
    }
}

impl<I2C> LevelView for LevelScreen<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn show(&mut self, cursor: DisplayCursor, label_visible: bool) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        scene::draw_level_scene(&mut self.display, cursor, label_visible)
            .map_err(|_| DisplayError::Draw)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(|_| DisplayError::Bus)
    }
}
