//! Round countdown
//!
//! Fed with elapsed milliseconds from the fixed-timestep loop and decremented
//! once per whole second, like a wall-clock seconds display.

/// Seconds-remaining counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    /// Milliseconds accumulated toward the next whole second
    carry_ms: u32,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self {
            remaining_secs: secs,
            carry_ms: 0,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn reset(&mut self, secs: u32) {
        *self = Self::new(secs);
    }

    /// Advance by `elapsed_ms`. Returns true exactly once: on the tick that
    /// takes the counter to zero.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }

        self.carry_ms = self.carry_ms.saturating_add(elapsed_ms);
        let whole = self.carry_ms / 1000;
        self.carry_ms %= 1000;
        self.remaining_secs = self.remaining_secs.saturating_sub(whole);

        if self.remaining_secs == 0 {
            self.carry_ms = 0;
            return true;
        }
        false
    }
}
