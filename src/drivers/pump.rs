//! Misting pump driver (MOSFET low-side switch).
//!
//! Variable-speed control via LEDC PWM (ch0). The pump is a simple DC
//! motor behind a logic-level MOSFET, so there is no direction control.
//!
//! ## Safety contract
//!
//! The pump must never run while the reservoir is empty or the refill
//! valve is open. Enforced by the control arbiter; this driver is a dumb
//! actuator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real PWM via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct PumpDriver {
    duty_percent: u8,
}

impl PumpDriver {
    pub fn new() -> Self {
        Self { duty_percent: 0 }
    }

    /// Set pump speed as a percentage (0 stops the pump).
    pub fn set_duty_percent(&mut self, duty_percent: u8) {
        let duty_percent = duty_percent.min(100);
        self.set_duty_hw(duty_percent);
        self.duty_percent = duty_percent;
    }

    pub fn stop(&mut self) {
        self.set_duty_percent(0);
    }

    fn set_duty_hw(&self, duty_percent: u8) {
        let max = (1u16 << pins::PWM_RESOLUTION_BITS) - 1;
        let duty_raw = ((duty_percent as u16) * max / 100) as u8;
        hw_init::ledc_set(hw_init::LEDC_CH_PUMP, duty_raw);
    }

    #[allow(dead_code)]
    pub fn is_running(&self) -> bool {
        self.duty_percent > 0
    }

    #[allow(dead_code)]
    pub fn current_duty(&self) -> u8 {
        self.duty_percent
    }
}

impl Default for PumpDriver {
    fn default() -> Self {
        Self::new()
    }
}
