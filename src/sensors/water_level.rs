//! Reservoir level: debounce filter + float switch probe.
//!
//! The float switch chatters as water sloshes, so the raw level passes
//! through a consecutive-sample filter before anything downstream sees
//! it: the debounced state flips only after `threshold` agreeing
//! samples in a row.  The arbitration core only ever observes the
//! debounced boolean.

use log::info;

use crate::ports::WaterLevelSource;

/// Consecutive-sample hysteresis over a noisy binary level signal.
///
/// Starts in the "present" state; counters saturate rather than wrap
/// during a long outage.
#[derive(Debug)]
pub struct WaterLevelFilter {
    present: bool,
    low_count: u32,
    high_count: u32,
    threshold: u32,
}

impl WaterLevelFilter {
    pub fn new(threshold: u32) -> Self {
        debug_assert!(threshold > 0, "zero debounce threshold");
        Self {
            present: true,
            low_count: 0,
            high_count: 0,
            threshold,
        }
    }

    /// Debounced level as of the last sample.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Feed one raw sample; returns the (possibly updated) debounced
    /// level.  A sample always resets the opposing counter, so a
    /// single reverted glitch restarts the count from scratch.
    pub fn update(&mut self, raw_present: bool) -> bool {
        if raw_present {
            self.high_count = self.high_count.saturating_add(1);
            self.low_count = 0;
            if !self.present && self.high_count >= self.threshold {
                self.present = true;
                info!(
                    "Water level restored ({} consecutive wet samples)",
                    self.threshold
                );
            }
        } else {
            self.low_count = self.low_count.saturating_add(1);
            self.high_count = 0;
            if self.present && self.low_count >= self.threshold {
                self.present = false;
                info!(
                    "Reservoir empty ({} consecutive dry samples)",
                    self.threshold
                );
            }
        }
        self.present
    }
}

// ───────────────────────────────────────────────────────────────
// Hardware probe
// ───────────────────────────────────────────────────────────────

/// Reservoir float switch on a bare input pin.  The switch pulls the
/// line HIGH when the float drops, so present == low level.
///
/// ## Dual-target design
///
/// On ESP-IDF: reads the real GPIO level via hw_init helpers.
/// On host/test: the pin reads LOW, i.e. water present.
pub struct FloatSwitch;

impl FloatSwitch {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FloatSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl WaterLevelSource for FloatSwitch {
    fn read(&mut self) -> bool {
        !crate::drivers::hw_init::gpio_read(crate::pins::WATER_LEVEL_GPIO)
    }
}
