//! Core types for timeline construction and pixel-group mapping.

use palette::Srgb;

/// How a timeline resolves a color between two keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceMode {
    /// Hold each keyframe's color until the next offset is reached.
    Stepped,

    /// Linearly blend toward the next keyframe as time elapses.
    Interpolated,
}

/// One of the two pixel groups a strip can be split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// Primary group. The only group in single-zone shows.
    A,
    /// Secondary group, used by dual-zone shows.
    B,
}

/// Maps pixel indices to zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zoning {
    /// Every pixel belongs to zone A.
    #[default]
    Single,

    /// Even pixels belong to zone A, odd pixels to zone B.
    Alternating,
}

impl Zoning {
    /// Returns the zone a pixel index belongs to.
    #[inline]
    pub const fn zone_of(self, pixel: usize) -> Zone {
        match self {
            Zoning::Single => Zone::A,
            Zoning::Alternating => {
                if pixel % 2 == 0 {
                    Zone::A
                } else {
                    Zone::B
                }
            }
        }
    }
}

/// A color event tagged with the beat offset at which it takes effect.
///
/// Dual-zone shows carry a separate color per zone; single-zone shows set
/// both to the same value via [`Keyframe::solid`]. Offsets are beats since
/// animation start (plus the timeline's start offset, see
/// [`TimelineBuilder::start_offset`](crate::timeline::TimelineBuilder::start_offset)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Color for zone A pixels.
    pub zone_a: Srgb,

    /// Color for zone B pixels.
    pub zone_b: Srgb,

    /// Beat offset at which this keyframe takes effect.
    pub at: f32,
}

impl Keyframe {
    /// Creates a keyframe that colors both zones identically.
    #[inline]
    pub const fn solid(color: Srgb, at: f32) -> Self {
        Self {
            zone_a: color,
            zone_b: color,
            at,
        }
    }

    /// Creates a keyframe with a distinct color per zone.
    #[inline]
    pub const fn split(zone_a: Srgb, zone_b: Srgb, at: f32) -> Self {
        Self { zone_a, zone_b, at }
    }

    /// Returns this keyframe's colors without the offset.
    #[inline]
    pub(crate) const fn colors(&self) -> FrameColors {
        FrameColors {
            a: self.zone_a,
            b: self.zone_b,
        }
    }
}

/// The resolved output colors for one render pass, one per zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameColors {
    /// Color for zone A pixels.
    pub a: Srgb,

    /// Color for zone B pixels.
    pub b: Srgb,
}

impl FrameColors {
    /// Returns the color for the given zone.
    #[inline]
    pub const fn for_zone(&self, zone: Zone) -> Srgb {
        match zone {
            Zone::A => self.a,
            Zone::B => self.b,
        }
    }
}

/// Timeline validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimelineError {
    /// No keyframes provided.
    Empty,

    /// A keyframe's offset is earlier than its predecessor's.
    DecreasingOffset {
        /// Index of the offending keyframe.
        index: usize,
    },

    /// More keyframes added than the timeline's capacity.
    CapacityExceeded,
}

impl core::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimelineError::Empty => {
                write!(f, "timeline must have at least one keyframe")
            }
            TimelineError::DecreasingOffset { index } => {
                write!(
                    f,
                    "keyframe {} has an earlier offset than its predecessor (offsets must be non-decreasing)",
                    index
                )
            }
            TimelineError::CapacityExceeded => {
                write!(f, "timeline capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimelineError {}
