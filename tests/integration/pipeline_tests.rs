//! Cross-task data-flow tests: the sensor and water tasks feeding the
//! control tick through `SharedState`, wired the same way boot wires
//! them.

use crate::mock_hw::{MockActuators, ScriptedProbe, ScriptedSensor, climate};

use mistkeeper::config::SystemConfig;
use mistkeeper::control::{ActuatorCommand, Arbiter};
use mistkeeper::error::SensorError;
use mistkeeper::sensors::water_level::WaterLevelFilter;
use mistkeeper::state::SharedState;
use mistkeeper::tasks;

#[test]
fn first_control_tick_runs_on_boot_assumptions() {
    // The control task may tick before the first climate sample lands.
    // Boot state reads as dry air over a full reservoir, so the pump
    // starts immediately and the valve stays shut.
    let mut arbiter = Arbiter::new(&SystemConfig::default());
    let mut sink = MockActuators::new();
    let state = SharedState::new();

    tasks::control_step(&mut arbiter, &mut sink, &state);
    assert_eq!(*sink.last(), ActuatorCommand::new(false, 85));
}

#[test]
fn sensor_fault_keeps_the_last_published_climate() {
    let mut sensor = ScriptedSensor::new(vec![
        Ok(climate(70.0)),
        Err(SensorError::Crc),
        Err(SensorError::Bus),
    ]);
    let state = SharedState::new();

    tasks::sensor_step(&mut sensor, &state);
    assert_eq!(state.climate().humidity_percent, 70.0);

    // Two failed samples in a row change nothing downstream.
    tasks::sensor_step(&mut sensor, &state);
    tasks::sensor_step(&mut sensor, &state);
    assert_eq!(state.climate().humidity_percent, 70.0);

    // 70% is over target, so the arbiter holds everything off.
    let mut arbiter = Arbiter::new(&SystemConfig::default());
    let mut sink = MockActuators::new();
    tasks::control_step(&mut arbiter, &mut sink, &state);
    assert_eq!(*sink.last(), ActuatorCommand::ALL_OFF);
}

#[test]
fn float_flicker_never_reaches_the_arbiter() {
    // Slosh pattern: two dry samples, wet again, repeatedly.  With a
    // threshold of three the debounced level never flips.
    let mut probe = ScriptedProbe::new(vec![
        false, false, true, false, false, true, false, false, true,
    ]);
    let mut filter = WaterLevelFilter::new(3);
    let state = SharedState::new();

    for _ in 0..9 {
        tasks::water_step(&mut probe, &mut filter, &state);
        assert!(state.water_present(), "flicker leaked through debounce");
    }

    let mut arbiter = Arbiter::new(&SystemConfig::default());
    let mut sink = MockActuators::new();
    state.publish_climate(climate(40.0));
    tasks::control_step(&mut arbiter, &mut sink, &state);
    assert!(!sink.valve_open(), "no refill on a debounced-present level");
}

#[test]
fn debounced_outage_triggers_a_refill_end_to_end() {
    let mut probe = ScriptedProbe::steady(false);
    let mut filter = WaterLevelFilter::new(3);
    let state = SharedState::new();
    state.publish_climate(climate(40.0));

    let mut arbiter = Arbiter::new(&SystemConfig::default());
    let mut sink = MockActuators::new();

    // Two dry polls: still presumed present, still misting.
    for _ in 0..2 {
        tasks::water_step(&mut probe, &mut filter, &state);
        tasks::control_step(&mut arbiter, &mut sink, &state);
    }
    assert_eq!(sink.pump_duty(), 85);

    // Third dry poll flips the debounced level; the next control tick
    // swaps the pump for the valve.
    tasks::water_step(&mut probe, &mut filter, &state);
    tasks::control_step(&mut arbiter, &mut sink, &state);
    assert_eq!(*sink.last(), ActuatorCommand::new(true, 0));
    assert!(!sink.saw_valve_and_pump_together());
}

#[test]
fn temperature_rides_along_into_the_status() {
    let mut sensor = ScriptedSensor::new(vec![Ok(mistkeeper::state::Climate {
        temperature_c: 23.4,
        humidity_percent: 41.0,
    })]);
    let state = SharedState::new();
    tasks::sensor_step(&mut sensor, &state);

    let mut arbiter = Arbiter::new(&SystemConfig::default());
    let mut sink = MockActuators::new();
    tasks::control_step(&mut arbiter, &mut sink, &state);

    let status = state.status();
    assert_eq!(status.temperature_c, 23.4);
    assert_eq!(status.humidity_percent, 41.0);
}
