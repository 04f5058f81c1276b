//! Fuzz target: the arbitration tick
//!
//! Interprets the input as a stream of sensed snapshots (one byte per
//! tick: low 7 bits humidity, high bit water present) and runs them
//! through the arbiter, asserting the actuator-exclusion invariant on
//! every command it emits.
//!
//! cargo fuzz run fuzz_control_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use mistkeeper::config::SystemConfig;
use mistkeeper::control::{Arbiter, SensedInputs};

fuzz_target!(|data: &[u8]| {
    let mut arbiter = Arbiter::new(&SystemConfig::default());

    for &byte in data {
        let cmd = arbiter.tick(&SensedInputs {
            temperature_c: 21.0,
            humidity_percent: f32::from(byte & 0x7F),
            water_present: byte & 0x80 != 0,
        });
        assert!(
            !(cmd.valve_open && cmd.pump_duty_percent > 0),
            "valve and pump commanded together"
        );
    }
});
