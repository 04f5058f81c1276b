//! DHT20 temperature/humidity sensor driver (I2C).
//!
//! Aosong's I2C successor to the DHT11/22 one-wire parts.  Protocol:
//! trigger a conversion (`0xAC 0x33 0x00`), wait at least 80 ms, read
//! a 7-byte frame of status + two packed 20-bit values + CRC-8.
//! A sensor fresh from power-up may need a one-time calibration
//! command first; `read` handles that lazily.
//!
//! Generic over [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`] so the frame handling runs against
//! a scripted bus in host tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::SensorError;

/// Fixed I2C address of the DHT20.
pub const DHT20_I2C_ADDR: u8 = 0x38;

const CMD_TRIGGER: [u8; 3] = [0xAC, 0x33, 0x00];
const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];

/// Status bit 7: conversion still in progress.
const STATUS_BUSY: u8 = 0x80;
/// Status bit 3: factory calibration loaded.
const STATUS_CALIBRATED: u8 = 0x08;

/// Datasheet minimum conversion time with margin.
const MEASUREMENT_DELAY_MS: u32 = 80;
/// Settling time after the calibration command.
const INIT_DELAY_MS: u32 = 10;

/// One decoded measurement, unconditioned (no offset, no clamping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurement {
    pub temperature_c: f32,
    pub humidity_percent: f32,
}

/// DHT20 on a (possibly shared) I2C bus.
pub struct Dht20<I2C> {
    i2c: I2C,
    calibrated: bool,
}

impl<I2C: I2c> Dht20<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            calibrated: false,
        }
    }

    /// Run one conversion and decode the result.
    ///
    /// Blocks for the conversion time (~80 ms).  Any bus, busy, or CRC
    /// trouble surfaces as a [`SensorError`]; the caller treats that
    /// as "no new sample" and retries on its next interval.
    pub fn read(&mut self, delay: &mut impl DelayNs) -> Result<RawMeasurement, SensorError> {
        self.ensure_calibrated(delay)?;

        self.i2c
            .write(DHT20_I2C_ADDR, &CMD_TRIGGER)
            .map_err(|_| SensorError::Bus)?;
        delay.delay_ms(MEASUREMENT_DELAY_MS);

        let mut frame = [0u8; 7];
        self.i2c
            .read(DHT20_I2C_ADDR, &mut frame)
            .map_err(|_| SensorError::Bus)?;
        parse_frame(&frame)
    }

    /// First-contact check: a sensor without its calibration bit set
    /// gets the init command once.
    fn ensure_calibrated(&mut self, delay: &mut impl DelayNs) -> Result<(), SensorError> {
        if self.calibrated {
            return Ok(());
        }
        let mut status = [0u8; 1];
        self.i2c
            .read(DHT20_I2C_ADDR, &mut status)
            .map_err(|_| SensorError::Bus)?;
        if status[0] & STATUS_CALIBRATED == 0 {
            self.i2c
                .write(DHT20_I2C_ADDR, &CMD_INIT)
                .map_err(|_| SensorError::Bus)?;
            delay.delay_ms(INIT_DELAY_MS);
        }
        self.calibrated = true;
        Ok(())
    }
}

/// Decode a 7-byte DHT20 frame.
///
/// Layout: `[status, h19..h12, h11..h4, h3..h0|t19..t16, t15..t8,
/// t7..t0, crc]` where humidity and temperature are 20-bit fractions
/// of full scale (0..100 %RH, -50..150 degC).
pub fn parse_frame(frame: &[u8; 7]) -> Result<RawMeasurement, SensorError> {
    if frame[0] & STATUS_BUSY != 0 {
        return Err(SensorError::Busy);
    }
    if crc8(&frame[..6]) != frame[6] {
        return Err(SensorError::Crc);
    }

    let hum_raw =
        (u32::from(frame[1]) << 12) | (u32::from(frame[2]) << 4) | (u32::from(frame[3]) >> 4);
    let temp_raw =
        ((u32::from(frame[3]) & 0x0F) << 16) | (u32::from(frame[4]) << 8) | u32::from(frame[5]);

    const FULL_SCALE: f32 = (1u32 << 20) as f32;
    Ok(RawMeasurement {
        humidity_percent: hum_raw as f32 / FULL_SCALE * 100.0,
        temperature_c: temp_raw as f32 / FULL_SCALE * 200.0 - 50.0,
    })
}

/// CRC-8 over the first six frame bytes, polynomial 0x31, init 0xFF.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}
