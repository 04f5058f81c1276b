//! Mission-level tests for the control pipeline.
//!
//! Each test walks the arbiter through a whole scenario via
//! `tasks::control_step`, with sensed values injected through
//! `SharedState` exactly as the sensor and water tasks publish them,
//! and asserts on the command stream a real actuator would have seen.

use crate::mock_hw::{MockActuators, climate};

use mistkeeper::config::SystemConfig;
use mistkeeper::control::{ActuatorCommand, Arbiter};
use mistkeeper::state::SharedState;
use mistkeeper::tasks;

fn setup() -> (Arbiter, MockActuators, SharedState) {
    (
        Arbiter::new(&SystemConfig::default()),
        MockActuators::new(),
        SharedState::new(),
    )
}

fn publish(state: &SharedState, humidity: f32, water_present: bool) {
    state.publish_climate(climate(humidity));
    state.publish_water_present(water_present);
}

fn step_n(arbiter: &mut Arbiter, sink: &mut MockActuators, state: &SharedState, n: u32) {
    for _ in 0..n {
        tasks::control_step(arbiter, sink, state);
    }
}

// ── Refill mission ────────────────────────────────────────────

#[test]
fn outage_refills_then_mists() {
    let (mut arbiter, mut sink, state) = setup();
    publish(&state, 35.0, false);

    // First tick opens the valve for the configured fill window.
    tasks::control_step(&mut arbiter, &mut sink, &state);
    assert_eq!(*sink.last(), ActuatorCommand::new(true, 0));
    assert_eq!(state.status().remaining_secs, 180);

    // Water returns mid-fill; the fill still runs its full course.
    publish(&state, 35.0, true);
    step_n(&mut arbiter, &mut sink, &state, 179);
    assert!(sink.valve_open(), "fill window not yet elapsed");

    // Closing tick, then the first misting tick.
    step_n(&mut arbiter, &mut sink, &state, 1);
    assert_eq!(*sink.last(), ActuatorCommand::ALL_OFF);
    step_n(&mut arbiter, &mut sink, &state, 1);
    assert_eq!(*sink.last(), ActuatorCommand::new(false, 85));

    assert!(!sink.saw_valve_and_pump_together());
}

#[test]
fn failed_refill_stays_quiet_until_water_is_seen() {
    let (mut arbiter, mut sink, state) = setup();
    publish(&state, 40.0, false);

    // Full fill plus the closing tick, reservoir still dry.
    step_n(&mut arbiter, &mut sink, &state, 181);
    assert_eq!(*sink.last(), ActuatorCommand::ALL_OFF);

    // No second fill attempt while the outage persists.
    step_n(&mut arbiter, &mut sink, &state, 300);
    assert!(
        sink.commands[181..]
            .iter()
            .all(|c| *c == ActuatorCommand::ALL_OFF),
        "supply failure must not retrigger the valve"
    );

    // Water finally arrives: misting resumes immediately.
    publish(&state, 40.0, true);
    step_n(&mut arbiter, &mut sink, &state, 1);
    assert_eq!(*sink.last(), ActuatorCommand::new(false, 85));
}

// ── Misting mission ───────────────────────────────────────────

#[test]
fn misting_duty_cycle_reaches_the_sink() {
    let (mut arbiter, mut sink, state) = setup();
    publish(&state, 40.0, true);

    step_n(&mut arbiter, &mut sink, &state, 121);

    let duties: Vec<u8> = sink.commands.iter().map(|c| c.pump_duty_percent).collect();
    assert!(duties[..60].iter().all(|&d| d == 85), "run window at duty");
    assert!(duties[60..120].iter().all(|&d| d == 0), "rest window idle");
    assert_eq!(duties[120], 85, "next cycle begins on schedule");
    assert!(sink.commands.iter().all(|c| !c.valve_open));
}

#[test]
fn target_reached_cuts_the_mist_and_resets_the_run() {
    let (mut arbiter, mut sink, state) = setup();
    publish(&state, 40.0, true);
    step_n(&mut arbiter, &mut sink, &state, 10);
    assert_eq!(sink.pump_duty(), 85);

    publish(&state, 55.0, true);
    step_n(&mut arbiter, &mut sink, &state, 1);
    assert_eq!(*sink.last(), ActuatorCommand::ALL_OFF);
    let status = state.status();
    assert!(!status.pump_on);
    assert_eq!(status.remaining_secs, 0);

    // Drying out again starts a fresh full run, not a resumed one.
    publish(&state, 40.0, true);
    step_n(&mut arbiter, &mut sink, &state, 1);
    assert_eq!(sink.pump_duty(), 85);
    assert_eq!(state.status().remaining_secs, 59);
}

#[test]
fn outage_mid_mist_suppresses_the_pump_for_the_whole_fill() {
    let (mut arbiter, mut sink, state) = setup();
    publish(&state, 40.0, true);
    step_n(&mut arbiter, &mut sink, &state, 5);
    assert_eq!(sink.pump_duty(), 85);

    publish(&state, 40.0, false);
    step_n(&mut arbiter, &mut sink, &state, 60);
    assert!(sink.valve_open(), "fill in progress");
    assert_eq!(sink.pump_duty(), 0);
    assert!(!sink.saw_valve_and_pump_together());
}

// ── Status publication ────────────────────────────────────────

#[test]
fn status_snapshot_tracks_the_fill_countdown() {
    let (mut arbiter, mut sink, state) = setup();
    publish(&state, 40.0, false);

    step_n(&mut arbiter, &mut sink, &state, 1);
    let s = state.status();
    assert!(s.valve_open);
    assert!(!s.pump_on);
    assert!(!s.water_present);
    assert_eq!(s.remaining_secs, 180);
    assert_eq!(s.target_percent, 50.0);
    assert_eq!(s.humidity_percent, 40.0);
    assert_eq!(s.temperature_c, 22.0);

    step_n(&mut arbiter, &mut sink, &state, 40);
    assert_eq!(state.status().remaining_secs, 140);
}
