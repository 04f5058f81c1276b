//! Cross-task shared state.
//!
//! Three independent cells, each with exactly one writer:
//!
//! ```text
//! sensor task ──▶ climate        (Mutex<Climate>)
//! water task  ──▶ water_present  (AtomicBool)
//! control task ─▶ status         (Mutex<ControlStatus>)
//! ```
//!
//! Every payload is plain `Copy` data, so readers hold a lock only long
//! enough to copy it out. The reservoir flag is a lock-free atomic so the
//! control tick can never block on the water poller.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A conditioned climate reading (offset applied, range-checked).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Climate {
    /// Air temperature (°C).
    pub temperature_c: f32,
    /// Relative humidity (0 – 100 %).
    pub humidity_percent: f32,
}

/// What the control task decided on its last tick, for the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStatus {
    /// Temperature the decision was based on (°C).
    pub temperature_c: f32,
    /// Humidity the decision was based on (0 – 100 %).
    pub humidity_percent: f32,
    /// Configured humidity target (0 – 100 %).
    pub target_percent: f32,
    /// Debounced reservoir state at decision time.
    pub water_present: bool,
    /// Valve commanded open this tick.
    pub valve_open: bool,
    /// Pump commanded on this tick.
    pub pump_on: bool,
    /// Seconds left in the active countdown (fill, run, or rest); 0 if none.
    pub remaining_secs: u32,
}

impl Default for ControlStatus {
    fn default() -> Self {
        Self {
            temperature_c: 0.0,
            humidity_percent: 0.0,
            target_percent: 0.0,
            // Matches the boot assumption in the debounce filter: assume
            // water until the probe proves otherwise.
            water_present: true,
            valve_open: false,
            pump_on: false,
            remaining_secs: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// All state that crosses a task boundary. Lives in an `Arc`, one clone
/// per task.
pub struct SharedState {
    climate: Mutex<Climate>,
    water_present: AtomicBool,
    status: Mutex<ControlStatus>,
}

impl SharedState {
    /// Boot-time state: zeroed climate, water assumed present, idle status.
    pub fn new() -> Self {
        Self {
            climate: Mutex::new(Climate::default()),
            water_present: AtomicBool::new(true),
            status: Mutex::new(ControlStatus::default()),
        }
    }

    pub fn publish_climate(&self, climate: Climate) {
        *recover(self.climate.lock()) = climate;
    }

    pub fn climate(&self) -> Climate {
        *recover(self.climate.lock())
    }

    pub fn publish_water_present(&self, present: bool) {
        self.water_present.store(present, Ordering::Release);
    }

    pub fn water_present(&self) -> bool {
        self.water_present.load(Ordering::Acquire)
    }

    pub fn publish_status(&self, status: ControlStatus) {
        *recover(self.status.lock()) = status;
    }

    pub fn status(&self) -> ControlStatus {
        *recover(self.status.lock())
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// A poisoned lock means a peer task panicked mid-copy. The payloads are
/// plain `Copy` structs, so the stored value is still whole: take it and
/// keep running instead of cascading the panic.
fn recover<T>(lock: Result<T, PoisonError<T>>) -> T {
    lock.unwrap_or_else(PoisonError::into_inner)
}
