//! Port traits: the boundary between control logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ task loop (domain)
//! ```
//!
//! Driven adapters (climate sensor, float switch, valve/pump hardware)
//! implement these traits.  The task loops in [`tasks`](crate::tasks)
//! consume them via generics, so the control core never touches hardware
//! directly and the whole pipeline runs against mocks on the host.

use crate::control::ActuatorCommand;
use crate::error::SensorError;
use crate::state::Climate;

// ───────────────────────────────────────────────────────────────
// Climate sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one conditioned temperature/humidity sample.
///
/// An `Err` means "no new sample this interval"; the caller keeps the
/// previously published values and tries again next interval.
pub trait SensorSource {
    fn read(&mut self) -> Result<Climate, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Water level port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw reservoir level probe.  Returns `true` while the float switch
/// reports water present.  Debouncing is the caller's job (the water
/// task owns a [`WaterLevelFilter`](crate::sensors::water_level::WaterLevelFilter)).
pub trait WaterLevelSource {
    fn read(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: apply one tick's actuation.
///
/// Fire-and-forget: writes are idempotent and re-applied every tick, so
/// an implementation that hiccups on one tick self-heals on the next.
pub trait ActuatorSink {
    fn apply(&mut self, command: &ActuatorCommand);
}
