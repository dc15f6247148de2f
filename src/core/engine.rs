//! Hysteresis state machine deciding when the sleep-inhibiting lease is held.
//!
//! Traffic above the threshold arms (or re-arms) a cooldown of `wait` ticks;
//! only after the cooldown drains on quiet ticks is the hold released. The
//! cooldown prevents flapping when traffic hovers around the threshold.

/// Whether the daemon currently believes a sleep inhibit should be in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InhibitionState {
    Uninhibited,
    Inhibited,
}

/// What the driver must do after one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No state change; any held lease stays held.
    Hold,
    /// Became Inhibited: acquire a lease and report the new status.
    Inhibit,
    /// Became Uninhibited: release the lease and report the new status.
    Uninhibit,
}

/// Per-tick threshold/hysteresis decision engine.
#[derive(Debug)]
pub struct DecisionEngine {
    threshold_bytes: u64,
    wait_ticks: u64,
    state: InhibitionState,
    cooldown: u64,
}

impl DecisionEngine {
    /// `threshold_bytes` is bytes-per-tick; `wait_ticks` is the number of
    /// consecutive quiet ticks required before release.
    pub fn new(threshold_bytes: u64, wait_ticks: u64) -> Self {
        Self {
            threshold_bytes,
            wait_ticks,
            state: InhibitionState::Uninhibited,
            cooldown: 0,
        }
    }

    pub fn state(&self) -> InhibitionState {
        self.state
    }

    /// Feed one tick's aggregate traffic and get the required transition.
    ///
    /// The threshold comparison is strict: traffic exactly at the threshold
    /// counts as quiet, so the bar for entering inhibition sits one byte above
    /// the bar for staying out of it.
    pub fn observe(&mut self, bytes_moved: u64) -> Transition {
        if bytes_moved > self.threshold_bytes {
            self.cooldown = self.wait_ticks;
            if self.state == InhibitionState::Uninhibited {
                self.state = InhibitionState::Inhibited;
                return Transition::Inhibit;
            }
        } else if self.cooldown > 0 {
            self.cooldown -= 1;
        } else if self.state == InhibitionState::Inhibited {
            self.state = InhibitionState::Uninhibited;
            return Transition::Uninhibit;
        }

        Transition::Hold
    }
}
