//! Offer Countdown
//!
//! Urgency timer shown on step 2. Purely cosmetic: nothing in validation or
//! submission looks at it.

/// Ten minutes
pub const COUNTDOWN_SECS: u32 = 10 * 60;

/// Remaining seconds, floored at zero
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_SECS)
    }
}

impl Countdown {
    pub const fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    /// One elapsed second
    pub const fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
