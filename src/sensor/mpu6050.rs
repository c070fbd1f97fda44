//! Blocking MPU6050 accelerometer driver.
//!
//! Only the accelerometer is used; the gyro stays at its reset defaults.
//! The chip shares the I²C bus with the OLED, so the driver takes any
//! `embedded_hal::i2c::I2c` (a shared-bus device in the firmware).

use crate::config::MPU6050_WHO_AM_I;
use crate::error::{ConfigError, Error, SensorError};
use crate::level::AccelSensor;
use crate::sensor::{Acceleration, ACCEL_FRAME_SIZE};
use embedded_hal::i2c::I2c;

/// Register map subset.
mod reg {
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// `PWR_MGMT_1`: sleep cleared, internal 8 MHz oscillator.
const PWR_WAKE: u8 = 0x00;

/// `ACCEL_CONFIG`: ±2 g full scale, no self-test.
const ACCEL_RANGE_2G: u8 = 0x00;

pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Mpu6050<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Verify the chip id, wake it and select the ±2 g range.
    pub fn init(&mut self) -> Result<(), Error> {
        let id = self.read_register(reg::WHO_AM_I)?;
        if id != MPU6050_WHO_AM_I {
            return Err(ConfigError::UnexpectedDeviceId(id).into());
        }

        self.write_register(reg::PWR_MGMT_1, PWR_WAKE)?;
        self.write_register(reg::ACCEL_CONFIG, ACCEL_RANGE_2G)?;

        #[cfg(feature = "defmt")]
        defmt::info!("MPU6050 ready at {=u8:#x}", self.address);
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| SensorError::Bus)
    }
}

impl<I2C> AccelSensor for Mpu6050<I2C>
where
    I2C: I2c,
{
    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError> {
        let mut buf = [0u8; ACCEL_FRAME_SIZE];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok(Acceleration::from_register_bytes(&buf))
    }
}
