//! Fuzz target: `dht20::parse_frame`
//!
//! Drives arbitrary 7-byte frames into the measurement decoder and
//! asserts that it never panics and that every accepted frame decodes
//! to values inside the sensor's physical output range.
//!
//! cargo fuzz run fuzz_dht20_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use mistkeeper::sensors::dht20::parse_frame;

fuzz_target!(|data: &[u8]| {
    if data.len() < 7 {
        return;
    }
    let mut frame = [0u8; 7];
    frame.copy_from_slice(&data[..7]);

    if let Ok(raw) = parse_frame(&frame) {
        // 20-bit raw words bound the decoded ranges.
        assert!(raw.humidity_percent.is_finite());
        assert!((0.0..100.0).contains(&raw.humidity_percent));
        assert!(raw.temperature_c.is_finite());
        assert!((-50.0..150.0).contains(&raw.temperature_c));
    }
});
