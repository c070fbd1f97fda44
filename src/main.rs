//! bubble-level firmware entry point (nRF52840).
//!
//! Brings up the shared I²C bus, the MPU6050 and the SSD1306, spawns the
//! mode-button task and then runs the level loop for the lifetime of the
//! device.

#![no_std]
#![no_main]

mod ui;

use bubble_level::config::{self, Pacing};
use bubble_level::level::{BubbleLevel, Clock, Frame};
use bubble_level::sensor::mpu6050::Mpu6050;
use core::cell::RefCell;
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use static_cell::StaticCell;
use ui::buttons::ButtonEdges;
use ui::display::LevelScreen;
use ui::ButtonChannel;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static I2C_BUS: StaticCell<RefCell<Twim<'static, peripherals::TWISPI0>>> = StaticCell::new();
static BUTTON_EVENTS: ButtonChannel = ButtonChannel::new();

/// Embassy uptime as the loop's monotonic clock.
struct Uptime;

impl Clock for Uptime {
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }
}

#[embassy_executor::task]
async fn toggle_button(pin: AnyPin) {
    let tx = BUTTON_EVENTS.sender();
    ui::buttons::toggle_button_task(pin, &tx).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("bubble-level starting");

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let bus: &'static RefCell<_> = I2C_BUS.init(RefCell::new(twim));

    // Give the panel and the IMU time to power up.
    Timer::after(Duration::from_millis(100)).await;

    let mut imu = Mpu6050::new(RefCellDevice::new(bus), config::MPU6050_ADDRESS);
    if let Err(e) = imu.init() {
        defmt::panic!("MPU6050 init failed: {}", e);
    }

    let mut screen = match ui::display::init(RefCellDevice::new(bus)) {
        Ok(display) => LevelScreen::new(display),
        Err(e) => defmt::panic!("SSD1306 init failed: {}", e),
    };
    info!("Display ready");

    unwrap!(spawner.spawn(toggle_button(p.P0_11.degrade())));

    let clock = Uptime;
    let mut level = BubbleLevel::new(clock.now_micros());
    let mut button = ButtonEdges::new(BUTTON_EVENTS.receiver());

    let period = Duration::from_micros(config::FRAME_PERIOD_US);
    let mut ticker = Ticker::every(period);
    info!("Level loop running, pacing {}", config::FRAME_PACING);

    loop {
        match level.step(&mut imu, &mut screen, &mut button, &clock) {
            Ok(frame) => log_frame(&frame),
            Err(e) => defmt::panic!("Level loop halted: {}", e),
        }

        match config::FRAME_PACING {
            Pacing::FixedSleep => Timer::after(period).await,
            Pacing::Deadline => ticker.next().await,
        }
    }
}

fn log_frame(frame: &Frame) {
    if frame.toggled {
        info!("Vertical tracking: {}", frame.vertical);
    }
    if frame.sensor_retries > 0 {
        info!("Sensor read recovered after {} retries", frame.sensor_retries);
    }
    if let Some(status) = &frame.status {
        info!(
            "Acceleration: X:{} Y:{} Z:{} m/s^2",
            status.raw.x, status.raw.y, status.raw.z
        );
        info!(
            "Average acceleration X:{} Y:{}",
            status.avg_x, status.avg_y
        );
        if let Some(y) = status.circle_y {
            info!("Circle Y: {}", y);
        }
        info!("Average loop duration: {} us", status.avg_loop_us);
    }
}
