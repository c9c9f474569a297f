//! Debounced button input.
//!
//! A mechanical switch bounces: the raw level flaps for a few milliseconds
//! around every press and release. [`Debouncer`] filters the raw samples and
//! emits one transition per stable level change, and nothing else.

/// Default debounce window in milliseconds.
pub const DEBOUNCE_WINDOW_MS: u64 = 50;

/// The logical level of the button.
///
/// Polarity mapping (active-low pull-up vs. active-high) is the
/// [`ButtonInput`] implementor's job; the core only sees logical levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLevel {
    /// Button is not being pressed.
    Released,
    /// Button is being pressed.
    Pressed,
}

/// Trait for abstracting the raw button pin.
///
/// Implement this for your input pin. Reads must be instantaneous and
/// non-blocking; the render loop polls once per tick.
pub trait ButtonInput {
    /// Returns the current raw (undebounced) level.
    fn level(&mut self) -> ButtonLevel;
}

/// Filters raw button samples into stable level transitions.
///
/// Tracks a candidate level alongside the confirmed one. A raw change only
/// restarts the window; the candidate is confirmed once the raw level has
/// held steady for the full window. Deterministic given the sequence of
/// `(raw, now_ms)` samples, with no side effects beyond its own state.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u64,
    confirmed: ButtonLevel,
    candidate: ButtonLevel,
    candidate_since_ms: u64,
}

impl Debouncer {
    /// Creates a debouncer with the given window, confirmed as released.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            confirmed: ButtonLevel::Released,
            candidate: ButtonLevel::Released,
            candidate_since_ms: 0,
        }
    }

    /// Feeds one raw sample, returning a transition if one is confirmed.
    ///
    /// Returns `Some(level)` exactly once per stable level change: when the
    /// raw level has differed from the confirmed level and held steady for at
    /// least the debounce window. Bounces shorter than the window emit
    /// nothing.
    pub fn poll(&mut self, raw: ButtonLevel, now_ms: u64) -> Option<ButtonLevel> {
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
            return None;
        }

        if now_ms.saturating_sub(self.candidate_since_ms) >= self.window_ms
            && raw != self.confirmed
        {
            self.confirmed = raw;
            return Some(raw);
        }

        None
    }

    /// Forces both candidate and confirmed levels to `level`.
    ///
    /// Called on the wake path so a button still held down from the wake
    /// press does not immediately read as a new transition.
    pub fn reset(&mut self, level: ButtonLevel, now_ms: u64) {
        self.confirmed = level;
        self.candidate = level;
        self.candidate_since_ms = now_ms;
    }

    /// Returns the current confirmed level.
    pub fn level(&self) -> ButtonLevel {
        self.confirmed
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_MS)
    }
}
