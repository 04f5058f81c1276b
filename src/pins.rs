//! GPIO / peripheral pin assignments for the MistKeeper main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// I²C bus (DHT20 climate sensor @ 0x38, SSD1306 OLED @ 0x3C)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

/// I²C bus clock. Both devices are happy at standard speed.
pub const I2C_FREQ_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// Water level float switch
// ---------------------------------------------------------------------------

/// Digital input from the reservoir float switch.
/// HIGH = float dropped (reservoir empty), LOW = water present.
pub const WATER_LEVEL_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// Misting pump (MOSFET low-side driver)
// ---------------------------------------------------------------------------

/// LEDC PWM output for pump speed control.
pub const PUMP_PWM_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// Refill valve (relay module)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = valve open (relay energised), LOW = closed.
pub const VALVE_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the pump MOSFET (1 kHz, driver-compatible).
pub const PUMP_PWM_FREQ_HZ: u32 = 1_000;
