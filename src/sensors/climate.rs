//! Conditioned climate readings.
//!
//! Wraps the raw [`Dht20`] driver behind [`SensorSource`]: readings are
//! rejected if non-finite, the board's humidity calibration offset is
//! applied, and the result is clamped to the physical 0..100 range.
//! Nothing downstream ever sees an unconditioned value.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::SensorError;
use crate::ports::SensorSource;
use crate::sensors::dht20::{Dht20, RawMeasurement};
use crate::state::Climate;

/// DHT20 plus the conditioning the rest of the system relies on.
pub struct ClimateSensor<I2C, D> {
    driver: Dht20<I2C>,
    delay: D,
    offset_percent: f32,
}

impl<I2C: I2c, D: DelayNs> ClimateSensor<I2C, D> {
    pub fn new(i2c: I2C, delay: D, offset_percent: f32) -> Self {
        Self {
            driver: Dht20::new(i2c),
            delay,
            offset_percent,
        }
    }
}

impl<I2C: I2c, D: DelayNs> SensorSource for ClimateSensor<I2C, D> {
    fn read(&mut self) -> Result<Climate, SensorError> {
        let raw = self.driver.read(&mut self.delay)?;
        condition(raw, self.offset_percent)
    }
}

/// Apply the calibration offset and range checks to a raw measurement.
fn condition(raw: RawMeasurement, offset_percent: f32) -> Result<Climate, SensorError> {
    if !raw.temperature_c.is_finite() || !raw.humidity_percent.is_finite() {
        return Err(SensorError::NonFinite);
    }
    Ok(Climate {
        temperature_c: raw.temperature_c,
        humidity_percent: (raw.humidity_percent + offset_percent).clamp(0.0, 100.0),
    })
}
