//! Mock adapters for integration tests.
//!
//! Records every actuator command so tests can assert on the full
//! history without touching real GPIO/PWM registers, and plays back
//! scripted sensor readings so whole missions run deterministically.

use std::collections::VecDeque;

use mistkeeper::control::ActuatorCommand;
use mistkeeper::error::SensorError;
use mistkeeper::ports::{ActuatorSink, SensorSource, WaterLevelSource};
use mistkeeper::state::Climate;

// ── MockActuators ─────────────────────────────────────────────

pub struct MockActuators {
    pub commands: Vec<ActuatorCommand>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn last(&self) -> &ActuatorCommand {
        self.commands.last().expect("no command applied yet")
    }

    pub fn valve_open(&self) -> bool {
        self.last().valve_open
    }

    pub fn pump_duty(&self) -> u8 {
        self.last().pump_duty_percent
    }

    /// True if any applied command had the valve open and the pump
    /// powered in the same tick.
    pub fn saw_valve_and_pump_together(&self) -> bool {
        self.commands
            .iter()
            .any(|c| c.valve_open && c.pump_duty_percent > 0)
    }
}

impl Default for MockActuators {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorSink for MockActuators {
    fn apply(&mut self, command: &ActuatorCommand) {
        self.commands.push(*command);
    }
}

// ── Scripted climate sensor ───────────────────────────────────

/// Plays back a fixed script of sensor results, then repeats the final
/// entry forever.  An empty script reads as a bus fault.
pub struct ScriptedSensor {
    script: VecDeque<Result<Climate, SensorError>>,
    last: Result<Climate, SensorError>,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new(script: Vec<Result<Climate, SensorError>>) -> Self {
        Self {
            script: script.into(),
            last: Err(SensorError::Bus),
        }
    }

    /// A sensor that always reports the same humidity.
    pub fn steady(humidity_percent: f32) -> Self {
        Self::new(vec![Ok(climate(humidity_percent))])
    }
}

impl SensorSource for ScriptedSensor {
    fn read(&mut self) -> Result<Climate, SensorError> {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Climate sample at a fixed bench temperature.
pub fn climate(humidity_percent: f32) -> Climate {
    Climate {
        temperature_c: 22.0,
        humidity_percent,
    }
}

// ── Scripted float switch ─────────────────────────────────────

/// Plays back a raw level script, then holds the final level.
pub struct ScriptedProbe {
    script: VecDeque<bool>,
    level: bool,
}

#[allow(dead_code)]
impl ScriptedProbe {
    pub fn new(script: Vec<bool>) -> Self {
        Self {
            script: script.into(),
            level: true,
        }
    }

    pub fn steady(present: bool) -> Self {
        Self {
            script: VecDeque::new(),
            level: present,
        }
    }
}

impl WaterLevelSource for ScriptedProbe {
    fn read(&mut self) -> bool {
        if let Some(next) = self.script.pop_front() {
            self.level = next;
        }
        self.level
    }
}
