//! Time abstraction and tempo conversion.
//!
//! All animation timing is wall-clock based: the render loop samples a
//! monotonic millisecond clock and converts elapsed time into musical beats.
//! Nothing in this crate counts ticks.

/// Trait for abstracting the platform's monotonic millisecond clock.
///
/// The epoch is arbitrary (fixed at boot); only differences between readings
/// are meaningful. Readings must never go backwards.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// A musical tempo, used to convert elapsed wall-clock time into beats.
///
/// Keyframe offsets are expressed in beats so a show stays aligned with its
/// soundtrack regardless of how fast the render loop happens to spin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tempo {
    ms_per_beat: f32,
}

impl Tempo {
    /// Creates a tempo from beats per minute.
    ///
    /// `beats_per_minute` must be positive; a zero or negative tempo produces
    /// a nonsensical (infinite or negative) beat length.
    #[inline]
    pub const fn bpm(beats_per_minute: f32) -> Self {
        Self {
            ms_per_beat: 60_000.0 / beats_per_minute,
        }
    }

    /// Returns the length of one beat in milliseconds.
    #[inline]
    pub const fn ms_per_beat(&self) -> f32 {
        self.ms_per_beat
    }

    /// Converts elapsed milliseconds into (fractional) elapsed beats.
    #[inline]
    pub fn beats(&self, elapsed_ms: u64) -> f32 {
        elapsed_ms as f32 / self.ms_per_beat
    }
}
