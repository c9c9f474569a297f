#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Timeline`**: a validated, ordered table of beat-tagged keyframes with a
//!   sequencing mode and optional pre-roll offset
//! - **`Keyframe`**: a color (or one color per zone) tagged with the beat
//!   offset at which it takes effect
//! - **`SequenceMode`**: how colors resolve between keyframes (hard `Stepped`
//!   or blended `Interpolated`)
//! - **`Cursor`**: the monotonically advancing position within a timeline,
//!   reset only on wake
//! - **`Debouncer`**: filters raw button samples into stable transitions
//! - **`PowerController`**: owns the awake flag and wake timestamp and drives
//!   the hardware sleep primitive
//! - **`BeatSequencer`**: the render loop; polls the button, samples the
//!   timeline, writes the strip, and decides when to sleep
//! - **`LedStrip`**, **`ButtonInput`**, **`Clock`**, **`SleepControl`**:
//!   traits to implement for your hardware
//!
//! The library uses `Srgb<f32>` (0.0-1.0 range) for all color operations and
//! interpolation, so blends stay inside the valid channel range by
//! construction. Convert to your device's native format (e.g. 8-bit per
//! channel) in your `LedStrip` implementation.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod colors;
pub mod power;
pub mod sequencer;
pub mod shows;
pub mod time;
pub mod timeline;
pub mod types;

pub use button::{ButtonInput, ButtonLevel, DEBOUNCE_WINDOW_MS, Debouncer};
pub use power::{PowerController, SleepControl};
pub use sequencer::{BeatSequencer, LedStrip, RunState, SequencerConfig};
pub use time::{Clock, Tempo};
pub use timeline::{Cursor, Timeline, TimelineBuilder};
pub use types::{FrameColors, Keyframe, SequenceMode, TimelineError, Zone, Zoning};

/// All channels off.
pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
