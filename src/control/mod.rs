//! Actuator arbitration - the control core.
//!
//! Once per tick the [`Arbiter`] evaluates four rules over a single
//! snapshot of sensed values, in strict priority order; the first
//! matching rule fully determines the tick's actuation:
//!
//! ```text
//!   1  humidity >= target        -> everything off
//!   2  fill in progress          -> pump off, fill countdown continues
//!   3  reservoir empty, no fill
//!      yet this outage           -> pump off, open valve for 180 s
//!   4  water present             -> clear outage latch, advance pump
//!      otherwise                 -> everything off
//! ```
//!
//! The ordering is the safety argument: rules 2 and 3 always force the
//! pump off while the valve runs, so no tick can command both
//! actuators on.  [`ActuatorCommand::new`] asserts that in debug
//! builds anyway.

pub mod pump;
pub mod valve;

pub use pump::{PumpMachine, PumpPhase};
pub use valve::{ValveMachine, ValvePhase};

use log::info;

use crate::config::SystemConfig;

/// One consistent snapshot of everything the arbiter decides from.
/// Produced upstream (sensor + water tasks), read-only within a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedInputs {
    /// Ambient temperature in Celsius; informational only.
    pub temperature_c: f32,
    /// Conditioned relative humidity in percent.
    pub humidity_percent: f32,
    /// Debounced reservoir level.
    pub water_present: bool,
}

impl Default for SensedInputs {
    fn default() -> Self {
        // Boot assumption: nothing measured yet, reservoir presumed
        // full until the float switch says otherwise.
        Self {
            temperature_c: 0.0,
            humidity_percent: 0.0,
            water_present: true,
        }
    }
}

/// The single actuation decision a tick produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommand {
    pub valve_open: bool,
    /// Pump drive while running, 0 otherwise (0-100).
    pub pump_duty_percent: u8,
}

impl ActuatorCommand {
    pub const ALL_OFF: Self = Self {
        valve_open: false,
        pump_duty_percent: 0,
    };

    pub fn new(valve_open: bool, pump_duty_percent: u8) -> Self {
        debug_assert!(
            !(valve_open && pump_duty_percent > 0),
            "valve and pump commanded on together"
        );
        Self {
            valve_open,
            pump_duty_percent,
        }
    }
}

/// The control core.  Owns both actuator state machines exclusively;
/// everything it knows about the world arrives through
/// [`SensedInputs`], and its only output is one [`ActuatorCommand`]
/// per tick.  It never fails: any well-formed snapshot, including a
/// stale one, yields a command.
pub struct Arbiter {
    target_humidity_percent: f32,
    at_target: bool,
    valve: ValveMachine,
    pump: PumpMachine,
}

impl Arbiter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            target_humidity_percent: config.target_humidity_percent,
            at_target: false,
            valve: ValveMachine::new(config.valve_fill_secs),
            pump: PumpMachine::new(
                config.pump_run_secs,
                config.pump_rest_secs,
                config.pump_duty_percent,
            ),
        }
    }

    /// Run one arbitration tick.
    pub fn tick(&mut self, inputs: &SensedInputs) -> ActuatorCommand {
        let at_target = inputs.humidity_percent >= self.target_humidity_percent;
        if at_target != self.at_target {
            if at_target {
                info!(
                    "Humidity target reached ({:.1}% >= {:.1}%)",
                    inputs.humidity_percent, self.target_humidity_percent
                );
            } else {
                info!(
                    "Humidity {:.1}% below target {:.1}%",
                    inputs.humidity_percent, self.target_humidity_percent
                );
            }
            self.at_target = at_target;
        }

        // Rule 1: humidity satisfied - stop everything, skip the rest.
        // An interrupted fill does not latch, so a later dry spell with
        // a still-empty reservoir starts a fresh fill.
        if at_target {
            self.valve.force_close("humidity at target");
            self.pump.force_idle("humidity at target");
            return ActuatorCommand::ALL_OFF;
        }

        // Rule 2: a fill in progress runs to completion; only rule 1
        // outranks it.
        if self.valve.is_filling() {
            self.pump.force_idle("valve filling");
            let open = self.valve.advance();
            return ActuatorCommand::new(open, 0);
        }

        // Rule 3: reservoir empty and not yet refilled this outage.
        if !inputs.water_present && !self.valve.filled_this_outage() {
            self.pump.force_idle("reservoir empty");
            self.valve.start_fill();
            return ActuatorCommand::new(true, 0);
        }

        // Rule 4: steady state.
        if inputs.water_present {
            self.valve.note_water_present();
            let duty = self.pump.advance();
            return ActuatorCommand::new(false, duty);
        }

        // Reservoir still empty after its one fill; hold everything
        // off until water is observed again.
        self.pump.force_idle("reservoir empty after fill");
        ActuatorCommand::ALL_OFF
    }

    #[allow(dead_code)]
    pub fn valve_open(&self) -> bool {
        self.valve.is_filling()
    }

    #[allow(dead_code)]
    pub fn pump_running(&self) -> bool {
        self.pump.is_running()
    }

    pub fn target_humidity_percent(&self) -> f32 {
        self.target_humidity_percent
    }

    /// Countdown of whichever phase is active (fill, run, or rest);
    /// 0 when everything is idle.  Drives the display's status row.
    pub fn remaining_secs(&self) -> u32 {
        if self.valve.is_filling() {
            self.valve.remaining_secs()
        } else {
            self.pump.remaining_secs()
        }
    }
}
