//! Misting pump duty-cycle state machine.
//!
//! ```text
//!        advance()                advance()
//!   Idle ────────▶ Running(run) ────────▶ Waiting(rest) ─┐
//!    ▲                 duty%                  duty 0     │
//!    │                                                   │
//!    └── force_idle() from any phase          back to Running
//! ```
//!
//! Entering a phase consumes that tick as the phase's first second, so
//! the stored remainder on entry is `duration - 1`; a finished rest
//! rolls straight into the next run with no idle gap tick.  `Idle` is
//! only observed at boot and after a forced interruption, and a restart
//! always begins a fresh full run: remaining time never survives an
//! interruption.

use log::info;

/// Where the pump is in its run/rest cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpPhase {
    Idle,
    Running { remaining_secs: u32 },
    Waiting { remaining_secs: u32 },
}

/// Drives the misting pump run-N / rest-M cycle.
#[derive(Debug)]
pub struct PumpMachine {
    phase: PumpPhase,
    run_secs: u32,
    rest_secs: u32,
    duty_percent: u8,
}

impl PumpMachine {
    pub fn new(run_secs: u32, rest_secs: u32, duty_percent: u8) -> Self {
        debug_assert!(run_secs > 0, "zero-length run phase");
        debug_assert!(rest_secs > 0, "zero-length rest phase");
        debug_assert!(duty_percent <= 100, "duty out of range");
        Self {
            phase: PumpPhase::Idle,
            run_secs,
            rest_secs,
            duty_percent,
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> PumpPhase {
        self.phase
    }

    /// True while the pump is physically driven.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, PumpPhase::Running { .. })
    }

    /// Seconds left in the current run or rest phase; 0 while idle.
    pub fn remaining_secs(&self) -> u32 {
        match self.phase {
            PumpPhase::Idle => 0,
            PumpPhase::Running { remaining_secs } | PumpPhase::Waiting { remaining_secs } => {
                remaining_secs
            }
        }
    }

    /// Advance the cycle by one permitted tick and return the duty to
    /// drive for this tick.
    pub fn advance(&mut self) -> u8 {
        self.phase = match self.phase {
            PumpPhase::Idle => {
                info!(
                    "Pump on - misting for {}s at {}%",
                    self.run_secs, self.duty_percent
                );
                PumpPhase::Running {
                    remaining_secs: self.run_secs.saturating_sub(1),
                }
            }
            PumpPhase::Running { remaining_secs: 0 } => {
                info!("Pump off - resting for {}s", self.rest_secs);
                PumpPhase::Waiting {
                    remaining_secs: self.rest_secs.saturating_sub(1),
                }
            }
            PumpPhase::Running { remaining_secs } => PumpPhase::Running {
                remaining_secs: remaining_secs - 1,
            },
            PumpPhase::Waiting { remaining_secs: 0 } => {
                // A completed rest starts the next run on this very
                // tick; there is no idle gap in the cycle.
                info!(
                    "Pump on - misting for {}s at {}%",
                    self.run_secs, self.duty_percent
                );
                PumpPhase::Running {
                    remaining_secs: self.run_secs.saturating_sub(1),
                }
            }
            PumpPhase::Waiting { remaining_secs } => PumpPhase::Waiting {
                remaining_secs: remaining_secs - 1,
            },
        };

        match self.phase {
            PumpPhase::Running { .. } => self.duty_percent,
            _ => 0,
        }
    }

    /// Interrupt the cycle from any phase, discarding the remainder.
    pub fn force_idle(&mut self, reason: &'static str) {
        if self.is_running() {
            info!("Pump off - {reason}");
        }
        self.phase = PumpPhase::Idle;
    }
}
