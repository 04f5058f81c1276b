//! Periodic task bodies.
//!
//! Each task is a `*_step` function plus a thin `*_loop` wrapper that
//! calls it forever at the configured interval.  The steps are generic
//! over the port traits, so integration tests drive the identical code
//! the firmware runs, minus the hardware.
//!
//! Cadence is deliberately sleep-based: the countdowns are whole
//! seconds, so phase drift from `thread::sleep` shifts timing but never
//! correctness.

use std::time::Duration;

use log::warn;

use crate::control::{Arbiter, SensedInputs};
use crate::ports::{ActuatorSink, SensorSource, WaterLevelSource};
use crate::sensors::water_level::WaterLevelFilter;
use crate::state::{ControlStatus, SharedState};

// ── Climate sampling ──────────────────────────────────────────

/// Take one climate sample and publish it.  On failure the previously
/// published values stay in place - a flaky sensor must not look like a
/// humidity change to the control task.
pub fn sensor_step(source: &mut impl SensorSource, state: &SharedState) {
    match source.read() {
        Ok(climate) => state.publish_climate(climate),
        Err(e) => warn!("Climate read failed ({e}) - keeping last values"),
    }
}

pub fn sensor_loop(mut source: impl SensorSource, state: &SharedState, interval: Duration) -> ! {
    loop {
        sensor_step(&mut source, state);
        std::thread::sleep(interval);
    }
}

// ── Water level polling ───────────────────────────────────────

/// Poll the raw probe once, debounce, publish.
pub fn water_step(
    probe: &mut impl WaterLevelSource,
    filter: &mut WaterLevelFilter,
    state: &SharedState,
) {
    state.publish_water_present(filter.update(probe.read()));
}

pub fn water_loop(
    mut probe: impl WaterLevelSource,
    state: &SharedState,
    debounce_samples: u32,
    interval: Duration,
) -> ! {
    let mut filter = WaterLevelFilter::new(debounce_samples);
    loop {
        water_step(&mut probe, &mut filter, state);
        std::thread::sleep(interval);
    }
}

// ── Control tick ──────────────────────────────────────────────

/// One full control tick: snapshot inputs, arbitrate, actuate, publish
/// status.  Sampling happens entirely before deciding, so a mid-tick
/// sensor update is observed next tick at the earliest.
pub fn control_step(arbiter: &mut Arbiter, sink: &mut impl ActuatorSink, state: &SharedState) {
    let climate = state.climate();
    let inputs = SensedInputs {
        temperature_c: climate.temperature_c,
        humidity_percent: climate.humidity_percent,
        water_present: state.water_present(),
    };

    let command = arbiter.tick(&inputs);
    sink.apply(&command);

    state.publish_status(ControlStatus {
        temperature_c: inputs.temperature_c,
        humidity_percent: inputs.humidity_percent,
        target_percent: arbiter.target_humidity_percent(),
        water_present: inputs.water_present,
        valve_open: command.valve_open,
        pump_on: command.pump_duty_percent > 0,
        remaining_secs: arbiter.remaining_secs(),
    });
}

pub fn control_loop(
    mut arbiter: Arbiter,
    mut sink: impl ActuatorSink,
    state: &SharedState,
    interval: Duration,
) -> ! {
    loop {
        control_step(&mut arbiter, &mut sink, state);
        std::thread::sleep(interval);
    }
}
