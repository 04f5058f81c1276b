#![allow(dead_code)] // Top-level Error reserved for typed port returns beyond SensorSource

//! Unified error types for the MistKeeper firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the top-level bring-up error handling uniform. All variants are `Copy`
//! so they can be cheaply passed between tasks without allocation.
//!
//! Invariant breaches (valve and pump commanded on together) have no
//! variant here: the arbitration rule order makes them unreachable, and
//! the remaining guards assert in debug builds or suppress-and-log in
//! the hardware sink rather than surface an error.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The climate sensor could not produce a usable sample.
    Sensor(SensorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Transient climate-sensor failures. The sensor task logs these and
/// keeps the previously published values in place; nothing downstream
/// of the task ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// An I2C transaction with the sensor failed.
    Bus,
    /// The measurement frame failed its CRC check.
    Crc,
    /// The sensor reported a conversion still in progress.
    Busy,
    /// The decoded reading was NaN or infinite.
    NonFinite,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C transaction failed"),
            Self::Crc => write!(f, "frame CRC mismatch"),
            Self::Busy => write!(f, "conversion in progress"),
            Self::NonFinite => write!(f, "non-finite reading"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
