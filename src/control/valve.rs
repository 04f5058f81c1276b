//! Refill valve state machine.
//!
//! The valve runs one fixed-length fill per reservoir outage.  Once a
//! fill has completed its full countdown, the `filled_this_outage`
//! latch blocks any further fill until water has actually been observed
//! present again, so a supply failure cannot make the valve hammer the
//! plumbing open/closed forever.

use log::info;

/// Where the valve is in its cycle.  `remaining_secs` only exists while
/// a fill is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValvePhase {
    Closed,
    Filling { remaining_secs: u32 },
}

/// Drives the refill valve for a fixed duration once per empty cycle.
#[derive(Debug)]
pub struct ValveMachine {
    phase: ValvePhase,
    filled_this_outage: bool,
    fill_secs: u32,
}

impl ValveMachine {
    pub fn new(fill_secs: u32) -> Self {
        debug_assert!(fill_secs > 0, "zero-length fill");
        Self {
            phase: ValvePhase::Closed,
            filled_this_outage: false,
            fill_secs,
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> ValvePhase {
        self.phase
    }

    pub fn is_filling(&self) -> bool {
        matches!(self.phase, ValvePhase::Filling { .. })
    }

    /// True once a fill has run its full countdown during the current
    /// reservoir outage.
    pub fn filled_this_outage(&self) -> bool {
        self.filled_this_outage
    }

    /// Seconds left in the current fill; 0 while closed.
    pub fn remaining_secs(&self) -> u32 {
        match self.phase {
            ValvePhase::Closed => 0,
            ValvePhase::Filling { remaining_secs } => remaining_secs,
        }
    }

    /// Open the valve for a full fill.  The opening tick itself counts
    /// as the first second of the fill.
    pub fn start_fill(&mut self) {
        info!("Valve open - refilling reservoir for {}s", self.fill_secs);
        self.phase = ValvePhase::Filling {
            remaining_secs: self.fill_secs,
        };
    }

    /// Advance a fill by one tick.  Returns whether the valve is still
    /// open for this tick; on the tick the countdown reaches zero the
    /// valve closes and the outage latch is set.
    pub fn advance(&mut self) -> bool {
        match self.phase {
            ValvePhase::Closed => false,
            ValvePhase::Filling { remaining_secs } => {
                let left = remaining_secs.saturating_sub(1);
                if left == 0 {
                    self.phase = ValvePhase::Closed;
                    self.filled_this_outage = true;
                    info!("Valve closed - fill complete");
                    false
                } else {
                    self.phase = ValvePhase::Filling {
                        remaining_secs: left,
                    };
                    true
                }
            }
        }
    }

    /// Interrupt a fill without crediting the outage latch; a later
    /// empty observation starts a fresh fill.
    pub fn force_close(&mut self, reason: &'static str) {
        if self.is_filling() {
            info!("Valve closed - {reason}");
        }
        self.phase = ValvePhase::Closed;
    }

    /// Water has been observed present while the valve is closed; the
    /// next outage may fill again.
    pub fn note_water_present(&mut self) {
        self.filled_this_outage = false;
    }
}
