//! Host-testable library interface for bubble-level.
//!
//! This crate root exposes the pure logic (smoothing, tilt mapping,
//! level detection, status throttling, scene composition) and the
//! MPU6050 driver, all of which can be tested on the host (no embedded
//! hardware required).
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and links against this library for everything except the nRF
//! peripherals, the SSD1306 wrapper and the button task.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod level;

// Internal module paths for implementations shared with the binary's
// directory layout.
#[path = "sensor/accel.rs"]
mod sensor_accel_impl;
#[path = "sensor/mpu6050.rs"]
mod sensor_mpu6050_impl;
#[path = "ui/scene.rs"]
mod ui_scene_impl;

pub mod sensor {
    pub mod accel {
        pub use crate::sensor_accel_impl::*;
    }
    pub mod mpu6050 {
        pub use crate::sensor_mpu6050_impl::*;
    }

    pub use accel::{counts_to_ms2, Acceleration, ACCEL_FRAME_SIZE};
}

pub mod ui {
    pub mod scene {
        pub use crate::ui_scene_impl::*;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::config::{
        HEIGHT, LEVEL_THRESHOLD, MPU6050_ADDRESS, MPU6050_WHO_AM_I, STATUS_INTERVAL_US, WIDTH,
    };
    use crate::error::{ConfigError, Error, SensorError};
    use crate::level::AccelSensor;
    use crate::level::smoothing::SmoothedSample;
    use crate::level::status::StatusTimer;
    use crate::level::tilt::{
        horizontal_offset, is_level, vertical_offset, DisplayCursor, TiltState,
    };
    use crate::level::ModeFlag;
    use crate::sensor::mpu6050::Mpu6050;
    use crate::sensor::{counts_to_ms2, Acceleration};
    use crate::ui::scene::{draw_level_scene, label_anchor, panel_center};
    use core::convert::Infallible;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ════════════════════════════════════════════════════════════════════════
    // SmoothedSample Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn smoothed_sample_starts_full_of_zeros() {
        let window: SmoothedSample<10> = SmoothedSample::new();
        assert_eq!(window.len(), 10);
        assert_eq!(window.capacity(), 10);
        assert_eq!(window.average(), 0.0);
    }

    #[test]
    fn smoothed_sample_first_push_is_diluted_by_zeros() {
        let mut window: SmoothedSample<10> = SmoothedSample::new();
        let avg = window.push(5.0);
        assert!(approx(avg, 0.5));
    }

    #[test]
    fn smoothed_sample_length_never_exceeds_capacity() {
        let mut window: SmoothedSample<4> = SmoothedSample::new();
        for i in 0..50 {
            window.push(i as f32);
            assert_eq!(window.len(), 4);
        }
    }

    #[test]
    fn smoothed_sample_averages_exactly_the_last_window() {
        let mut window: SmoothedSample<4> = SmoothedSample::new();
        let samples = [3.0, -1.0, 7.5, 2.0, 10.0, -4.0, 6.0, 1.5, 0.25];
        for (i, &s) in samples.iter().enumerate() {
            let avg = window.push(s);
            if i + 1 >= 4 {
                let tail = &samples[i + 1 - 4..=i];
                let mean = tail.iter().sum::<f32>() / 4.0;
                assert!(approx(avg, mean), "push {}: {} vs {}", i, avg, mean);
            }
        }
    }

    #[test]
    fn smoothed_sample_ramps_up_while_zeros_drain() {
        let mut window: SmoothedSample<4> = SmoothedSample::new();
        assert!(approx(window.push(8.0), 2.0));
        assert!(approx(window.push(8.0), 4.0));
        assert!(approx(window.push(8.0), 6.0));
        assert!(approx(window.push(8.0), 8.0));
        assert!(approx(window.push(8.0), 8.0));
    }

    #[test]
    fn smoothed_sample_average_does_not_mutate() {
        let mut window: SmoothedSample<2> = SmoothedSample::new();
        window.push(4.0);
        assert!(approx(window.average(), 2.0));
        assert!(approx(window.average(), 2.0));
    }

    #[test]
    fn smoothed_sample_zero_window_stays_empty() {
        let mut window: SmoothedSample<0> = SmoothedSample::new();
        assert_eq!(window.push(3.0), 0.0);
        assert_eq!(window.len(), 0);
        assert!(window.is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Tilt Mapping Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn offsets_floor_negative_values() {
        // floor(-0.6) = -1, truncation would give 0.
        assert_eq!(horizontal_offset(-0.03), -1);
        assert_eq!(horizontal_offset(-0.06), -2);
        assert_eq!(vertical_offset(-0.03, true), -1);
    }

    #[test]
    fn offsets_floor_positive_values() {
        assert_eq!(horizontal_offset(0.0), 0);
        assert_eq!(horizontal_offset(0.10), 2);
        assert_eq!(horizontal_offset(0.149), 2);
        assert_eq!(vertical_offset(0.2, true), 4);
    }

    #[test]
    fn vertical_offset_is_zero_when_tracking_off() {
        assert_eq!(vertical_offset(0.2, false), 0);
        assert_eq!(vertical_offset(-3.0, false), 0);
    }

    #[test]
    fn level_uses_only_y_when_tracking_off() {
        assert!(is_level(0.0, 0.0, false));
        assert!(is_level(5.0, 0.05, false));
        assert!(is_level(5.0, -0.05, false));
        assert!(!is_level(0.0, 0.051, false));
        assert!(!is_level(0.0, -0.10, false));
    }

    #[test]
    fn level_requires_both_axes_when_tracking_on() {
        assert!(is_level(0.0, 0.0, true));
        assert!(is_level(-0.05, 0.05, true));
        assert!(!is_level(0.06, 0.0, true));
        assert!(!is_level(0.0, 0.06, true));
    }

    #[test]
    fn level_threshold_is_inclusive() {
        assert!(is_level(LEVEL_THRESHOLD, LEVEL_THRESHOLD, true));
    }

    #[test]
    fn scenario_centered_and_level() {
        let cursor = DisplayCursor::from_averages(0.0, 0.0, false);
        assert_eq!(cursor, DisplayCursor::centered());
        assert!(is_level(0.0, 0.0, false));
        assert_eq!(cursor.center(), ((WIDTH / 2) as i32, (HEIGHT / 2) as i32));
    }

    #[test]
    fn scenario_tilted_right() {
        let cursor = DisplayCursor::from_averages(0.0, 0.10, false);
        assert_eq!(cursor.dx, 2);
        assert_eq!(cursor.dy, 0);
        assert!(!is_level(0.0, 0.10, false));
    }

    #[test]
    fn scenario_vertical_tracking() {
        let cursor = DisplayCursor::from_averages(0.2, -0.06, true);
        assert_eq!(cursor.dx, -2);
        assert_eq!(cursor.dy, 4);
        assert!(!is_level(0.2, -0.06, true));
    }

    #[test]
    fn tilt_state_cross_maps_axes() {
        let mut tilt: TiltState<1> = TiltState::new();
        let (avg_x, avg_y) = tilt.update(Acceleration::new(0.25, -0.125, 9.8));
        assert_eq!(avg_x, 0.25);
        assert_eq!(avg_y, -0.125);

        // Y drives horizontal, X drives vertical.
        assert_eq!(tilt.cursor(true), DisplayCursor { dx: -3, dy: 5 });
        assert_eq!(tilt.cursor(false), DisplayCursor { dx: -3, dy: 0 });
    }

    #[test]
    fn tilt_state_ignores_z() {
        let mut tilt: TiltState<1> = TiltState::new();
        tilt.update(Acceleration::new(0.0, 0.0, 9.81));
        assert!(tilt.is_level(true));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Mode / Status Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn mode_flag_defaults_off_and_toggles() {
        let mut mode = ModeFlag::default();
        assert!(!mode.vertical());
        mode.toggle();
        assert!(mode.vertical());
        mode.toggle();
        assert!(!mode.vertical());
    }

    #[test]
    fn status_timer_waits_one_interval() {
        let mut timer = StatusTimer::new(1_000);
        assert!(!timer.should_emit(1_000));
        assert!(!timer.should_emit(1_000 + STATUS_INTERVAL_US - 1));
        assert!(timer.should_emit(1_000 + STATUS_INTERVAL_US));
        assert_eq!(timer.last_emit_us(), 1_000 + STATUS_INTERVAL_US);
    }

    #[test]
    fn status_timer_restarts_from_emit_time() {
        let mut timer = StatusTimer::with_interval(0, 100);
        assert!(timer.should_emit(150));
        // Measured from the last emit (150), not from the previous deadline.
        assert!(!timer.should_emit(220));
        assert!(timer.should_emit(250));
    }

    #[test]
    fn status_timer_is_rate_independent() {
        let mut timer = StatusTimer::with_interval(0, 1_000_000);
        // 1 kHz polling over 3.5 s of elapsed time.
        let emitted = (0..3_500u64)
            .filter(|ms| timer.should_emit(ms * 1_000))
            .count();
        assert_eq!(emitted, 3);
    }

    #[test]
    fn status_timer_tolerates_clock_going_backwards() {
        let mut timer = StatusTimer::with_interval(500, 100);
        assert!(!timer.should_emit(10));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Sensor Scaling Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn counts_scale_to_standard_gravity() {
        assert!(approx(counts_to_ms2(16_384), 9.806_65));
        assert!(approx(counts_to_ms2(-16_384), -9.806_65));
        assert_eq!(counts_to_ms2(0), 0.0);
    }

    #[test]
    fn register_bytes_are_big_endian_per_axis() {
        // X = +1 g, Y = -0.5 g, Z = 0
        let data = [0x40, 0x00, 0xE0, 0x00, 0x00, 0x00];
        let accel = Acceleration::from_register_bytes(&data);
        assert!(approx(accel.x, 9.806_65));
        assert!(approx(accel.y, -4.903_325));
        assert_eq!(accel.z, 0.0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // MPU6050 Driver Tests
    // ════════════════════════════════════════════════════════════════════════

    #[derive(Debug)]
    struct Nack;

    impl embedded_hal::i2c::Error for Nack {
        fn kind(&self) -> ErrorKind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    /// Register-file I²C device: the first written byte selects the
    /// register, reads auto-increment from there.
    struct FakeImu {
        registers: [u8; 128],
        /// `(address, [register, value])` for every register write.
        writes: Vec<(u8, Vec<u8>)>,
        nack: bool,
        pointer: usize,
    }

    impl FakeImu {
        fn with_id(id: u8) -> Self {
            let mut registers = [0u8; 128];
            registers[0x75] = id;
            Self {
                registers,
                writes: Vec::new(),
                nack: false,
                pointer: 0,
            }
        }
    }

    impl ErrorType for FakeImu {
        type Error = Nack;
    }

    impl I2c for FakeImu {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.nack {
                return Err(Nack);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.pointer = bytes[0] as usize;
                        if bytes.len() > 1 {
                            self.writes.push((address, bytes.to_vec()));
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = self.registers[self.pointer + i];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn mpu6050_rejects_unexpected_device_id() {
        let mut bus = FakeImu::with_id(0x70);
        let result = Mpu6050::new(&mut bus, MPU6050_ADDRESS).init();
        assert_eq!(
            result,
            Err(Error::Config(ConfigError::UnexpectedDeviceId(0x70)))
        );
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn mpu6050_init_wakes_then_selects_2g() {
        let mut bus = FakeImu::with_id(MPU6050_WHO_AM_I);
        assert_eq!(Mpu6050::new(&mut bus, MPU6050_ADDRESS).init(), Ok(()));
        assert_eq!(
            bus.writes,
            vec![
                (MPU6050_ADDRESS, vec![0x6B, 0x00]),
                (MPU6050_ADDRESS, vec![0x1C, 0x00]),
            ]
        );
    }

    #[test]
    fn mpu6050_bus_fault_maps_to_sensor_bus_error() {
        let mut bus = FakeImu::with_id(MPU6050_WHO_AM_I);
        bus.nack = true;
        let mut imu = Mpu6050::new(&mut bus, MPU6050_ADDRESS);
        assert_eq!(imu.init(), Err(Error::Sensor(SensorError::Bus)));
        assert_eq!(imu.read_acceleration(), Err(SensorError::Bus));
    }

    #[test]
    fn mpu6050_burst_reads_from_accel_xout_h() {
        let mut bus = FakeImu::with_id(MPU6050_WHO_AM_I);
        let burst = [0x40, 0x00, 0xE0, 0x00, 0x20, 0x00];
        bus.registers[0x3B..0x41].copy_from_slice(&burst);

        let accel = Mpu6050::new(&mut bus, MPU6050_ADDRESS)
            .read_acceleration()
            .unwrap();
        assert_eq!(accel, Acceleration::from_register_bytes(&burst));
        assert!(approx(accel.z, 4.903_325));
        assert_eq!(bus.pointer, 0x3B);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scene Tests
    // ════════════════════════════════════════════════════════════════════════

    /// 128×64 monochrome framebuffer that clips like the SSD1306 buffer does.
    struct FrameBuffer {
        pixels: [[bool; WIDTH as usize]; HEIGHT as usize],
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: [[false; WIDTH as usize]; HEIGHT as usize],
            }
        }

        fn lit(&self, x: i32, y: i32) -> bool {
            self.pixels[y as usize][x as usize]
        }

        fn any_lit(&self, xs: core::ops::Range<i32>, ys: core::ops::Range<i32>) -> bool {
            ys.clone().any(|y| xs.clone().any(|x| self.lit(x, y)))
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(WIDTH, HEIGHT)
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0
                    && point.y >= 0
                    && (point.x as u32) < WIDTH
                    && (point.y as u32) < HEIGHT
                {
                    self.pixels[point.y as usize][point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    #[test]
    fn scene_draws_white_border_and_black_playfield() {
        let mut fb = FrameBuffer::new();
        draw_level_scene(&mut fb, DisplayCursor::centered(), false).unwrap();
        assert!(fb.lit(0, 0));
        assert!(fb.lit(2, 2));
        assert!(fb.lit(127, 63));
        assert!(!fb.lit(3, 3));
        assert!(!fb.lit(124, 60));
    }

    #[test]
    fn scene_fills_bubble_at_cursor() {
        let mut fb = FrameBuffer::new();
        let cursor = DisplayCursor { dx: 30, dy: 0 };
        draw_level_scene(&mut fb, cursor, false).unwrap();

        let (x, y) = cursor.center();
        assert!(fb.lit(x, y));
        // Target circle interior stays black where the bubble does not reach.
        let center = panel_center();
        assert!(!fb.lit(center.x - 10, center.y));
        // Target outline is still drawn.
        assert!(fb.lit(center.x - 15, center.y));
    }

    #[test]
    fn scene_label_only_when_visible() {
        let anchor = label_anchor();
        // Rows between the circles' outer stroke and the label anchor.
        let xs = anchor.x - 18..anchor.x + 18;
        let ys = (HEIGHT as i32 / 2 + 17)..anchor.y;

        let mut hidden = FrameBuffer::new();
        draw_level_scene(&mut hidden, DisplayCursor::centered(), false).unwrap();
        assert!(!hidden.any_lit(xs.clone(), ys.clone()));

        let mut shown = FrameBuffer::new();
        draw_level_scene(&mut shown, DisplayCursor::centered(), true).unwrap();
        assert!(shown.any_lit(xs, ys));
    }

    #[test]
    fn scene_clips_bubble_pushed_off_screen() {
        let mut fb = FrameBuffer::new();
        let cursor = DisplayCursor { dx: 200, dy: -200 };
        assert!(draw_level_scene(&mut fb, cursor, false).is_ok());
        assert!(!fb.lit(WIDTH as i32 / 2, HEIGHT as i32 / 2 - 10));
    }
}
