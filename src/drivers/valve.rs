//! Reservoir refill valve driver (relay module).
//!
//! Plain on/off digital output: HIGH energises the relay coil and opens
//! the solenoid valve, LOW closes it. Mains-side water pressure does the
//! actual work, so there is nothing to ramp.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the relay GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct ValveDriver {
    open: bool,
}

impl ValveDriver {
    pub fn new() -> Self {
        // Matches the LOW level forced during init_gpio_outputs().
        Self { open: false }
    }

    pub fn set_open(&mut self, open: bool) {
        hw_init::gpio_write(pins::VALVE_GPIO, open);
        self.open = open;
    }

    #[allow(dead_code)]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Default for ValveDriver {
    fn default() -> Self {
        Self::new()
    }
}
