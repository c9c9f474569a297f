//! Color constants and 8-bit conversion helper.
//!
//! The core works in `Srgb<f32>` (0.0-1.0 range) so interpolation stays within
//! the valid channel range by construction; hardware drivers convert to their
//! native format in their [`LedStrip`](crate::sequencer::LedStrip)
//! implementation. The constants below are the palette of the shipped show.

use palette::Srgb;

/// Creates an RGB color from 8-bit channel values.
#[inline]
pub const fn rgb8(red: u8, green: u8, blue: u8) -> Srgb {
    Srgb::new(
        red as f32 / 255.0,
        green as f32 / 255.0,
        blue as f32 / 255.0,
    )
}

/// All channels off.
pub const OFF: Srgb = rgb8(0, 0, 0);
/// Faint white glow.
pub const DIM_WHITE: Srgb = rgb8(20, 20, 20);
/// Full-intensity white.
pub const BRIGHT_WHITE: Srgb = rgb8(255, 255, 255);
/// Half-intensity blue-tinted white.
pub const WHITE_BLUE: Srgb = rgb8(64, 64, 127);
/// Full-intensity blue-tinted white.
pub const BRIGHT_WHITE_BLUE: Srgb = rgb8(128, 128, 255);
/// Full-intensity purple.
pub const BRIGHT_PURPLE: Srgb = rgb8(255, 0, 255);
/// Full-intensity blue.
pub const BRIGHT_BLUE: Srgb = rgb8(0, 0, 255);
/// Half-intensity red-tinted white.
pub const WHITE_RED: Srgb = rgb8(127, 64, 64);
/// Half-intensity yellow.
pub const YELLOW: Srgb = rgb8(127, 127, 0);
/// Half-intensity blue.
pub const BLUE: Srgb = rgb8(0, 0, 127);
/// Half-intensity red.
pub const RED: Srgb = rgb8(127, 0, 0);
/// Half-intensity purple.
pub const PURPLE: Srgb = rgb8(127, 0, 127);
/// Half-intensity green.
pub const GREEN: Srgb = rgb8(0, 127, 0);
