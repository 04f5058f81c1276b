//! Hardware adapter: bridges the real actuators to [`ActuatorSink`].
//!
//! Owns the valve and pump drivers and is the only module that applies
//! control decisions to actual hardware. On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs, so this type is
//! constructible (and testable) on the host.

use log::error;

use crate::control::ActuatorCommand;
use crate::drivers::pump::PumpDriver;
use crate::drivers::valve::ValveDriver;
use crate::ports::ActuatorSink;

/// Concrete adapter that combines both actuators behind the sink trait.
pub struct HardwareActuators {
    valve: ValveDriver,
    pump: PumpDriver,
}

impl HardwareActuators {
    pub fn new(valve: ValveDriver, pump: PumpDriver) -> Self {
        Self { valve, pump }
    }

    #[allow(dead_code)]
    pub fn is_valve_open(&self) -> bool {
        self.valve.is_open()
    }

    #[allow(dead_code)]
    pub fn pump_duty(&self) -> u8 {
        self.pump.current_duty()
    }
}

impl ActuatorSink for HardwareActuators {
    fn apply(&mut self, command: &ActuatorCommand) {
        let mut duty = command.pump_duty_percent;
        if command.valve_open && duty > 0 {
            // The arbiter never emits this pairing; if it ever does, the
            // refill wins and the pump loses.
            error!("Valve and pump commanded together - suppressing pump");
            duty = 0;
        }

        // Off-transitions first, so a fill-to-mist handover never overlaps
        // the relay and the motor even for an instant.
        if duty == 0 {
            self.pump.stop();
        }
        self.valve.set_open(command.valve_open);
        if duty > 0 {
            self.pump.set_duty_percent(duty);
        }
    }
}
