//! System configuration parameters
//!
//! All tunable parameters for the MistKeeper controller. Every value is
//! fixed at build time; the struct exists so the whole parameter set can
//! be logged at boot and sanity-checked in one place.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Humidity ---
    /// Relative humidity (%) at and above which all actuation stops
    pub target_humidity_percent: f32,
    /// Calibration offset added to the raw sensor humidity (%)
    pub humidity_offset_percent: f32,

    // --- Valve ---
    /// Refill valve open duration per fill cycle (seconds)
    pub valve_fill_secs: u32,

    // --- Pump ---
    /// Misting pump run phase duration (seconds)
    pub pump_run_secs: u32,
    /// Misting pump rest phase duration (seconds)
    pub pump_rest_secs: u32,
    /// Pump PWM duty cycle while running (0-100%)
    pub pump_duty_percent: u8,

    // --- Water level ---
    /// Consecutive agreeing samples before the debounced level flips
    pub water_debounce_samples: u32,

    // --- Timing ---
    /// Climate sensor read interval (milliseconds); the DHT20 needs
    /// more than 1000 ms between conversions
    pub sensor_read_interval_ms: u32,
    /// Water level sample interval (milliseconds)
    pub water_poll_interval_ms: u32,
    /// Arbitration tick interval (milliseconds)
    pub control_tick_interval_ms: u32,
    /// Display refresh interval (milliseconds)
    pub display_refresh_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Humidity
            target_humidity_percent: 50.0,
            humidity_offset_percent: -10.0,

            // Valve
            valve_fill_secs: 180,

            // Pump
            pump_run_secs: 60,
            pump_rest_secs: 60,
            pump_duty_percent: 85,

            // Water level
            water_debounce_samples: 10,

            // Timing
            sensor_read_interval_ms: 2000,   // DHT20 conversion spacing
            water_poll_interval_ms: 1000,    // 1 Hz
            control_tick_interval_ms: 1000,  // 1 Hz
            display_refresh_interval_ms: 1000,
        }
    }
}
