//! Keyframe timelines: the ordered event table and its sampling logic.
//!
//! A [`Timeline`] is a validated, immutable table of [`Keyframe`]s with
//! non-decreasing beat offsets. Sampling it with a monotonically advancing
//! [`Cursor`] resolves the output color for any elapsed-beats value, either by
//! stepping to the latest passed keyframe or by interpolating between the two
//! bracketing ones.

use crate::types::{FrameColors, Keyframe, SequenceMode, TimelineError};
use heapless::Vec;
use palette::{Mix, Srgb};

/// A position within a timeline.
///
/// The cursor only ever moves forward; it is reset to the first keyframe on a
/// wake transition and never revisits a keyframe it has advanced past.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Creates a cursor at the first keyframe.
    #[inline]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Resets the cursor to the first keyframe.
    #[inline]
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Returns the current keyframe index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// A validated keyframe animation timeline.
///
/// Timelines are fixed at build time and never mutated at runtime. They are
/// constructed through [`TimelineBuilder`], which enforces the table
/// invariants (non-empty, non-decreasing offsets) once, up front.
///
/// Two adjacent keyframes may share the same offset: the cursor skips to the
/// later one the moment that offset passes, producing a hard cut with no
/// interpolation ramp.
///
/// # Type Parameters
/// * `N` - Maximum number of keyframes this timeline can hold
#[derive(Debug, Clone)]
pub struct Timeline<const N: usize> {
    frames: Vec<Keyframe, N>,
    start_offset: f32,
    mode: SequenceMode,
}

impl<const N: usize> Timeline<N> {
    /// Creates a new timeline builder.
    pub fn builder() -> TimelineBuilder<N> {
        TimelineBuilder::new()
    }

    /// Resolves the output colors for the given elapsed time in beats.
    ///
    /// Advances `cursor` to the last keyframe whose effective offset (table
    /// offset plus start offset) has been reached, then resolves colors per
    /// the timeline's [`SequenceMode`]:
    ///
    /// * `Stepped` - exactly the cursor keyframe's colors.
    /// * `Interpolated` - a linear blend between the cursor keyframe and its
    ///   successor, weighted by fractional progress between their offsets.
    ///   Before the first keyframe the first colors are held; at or after the
    ///   last keyframe the last colors are held.
    ///
    /// The returned flag is true once `elapsed_beats` has reached the last
    /// keyframe's effective offset. It stays true for any later elapsed value
    /// until the cursor is reset.
    pub fn sample(&self, cursor: &mut Cursor, elapsed_beats: f32) -> (FrameColors, bool) {
        let last = self.frames.len() - 1;

        while cursor.index < last && self.event_time(cursor.index + 1) <= elapsed_beats {
            cursor.index += 1;
        }

        let done = cursor.index == last && self.event_time(last) <= elapsed_beats;

        let colors = match self.mode {
            SequenceMode::Stepped => self.frames[cursor.index].colors(),
            SequenceMode::Interpolated => {
                if cursor.index == last {
                    self.frames[last].colors()
                } else {
                    let left = &self.frames[cursor.index];
                    let right = &self.frames[cursor.index + 1];
                    let left_time = self.event_time(cursor.index);
                    let span = self.event_time(cursor.index + 1) - left_time;
                    // span == 0 only before the first keyframe of an
                    // instant-cut pair; hold the left color.
                    let weight = if span > 0.0 {
                        ((elapsed_beats - left_time) / span).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    FrameColors {
                        a: left.zone_a.mix(right.zone_a, weight),
                        b: left.zone_b.mix(right.zone_b, weight),
                    }
                }
            }
        };

        (colors, done)
    }

    /// Returns the number of keyframes in this timeline.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns false; timelines are never empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the sequencing mode.
    pub fn mode(&self) -> SequenceMode {
        self.mode
    }

    /// Returns the pre-roll offset in beats.
    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    /// Returns a reference to the keyframe at the given index.
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.frames.get(index)
    }

    /// The effective beat offset of a keyframe, including the start offset.
    #[inline]
    fn event_time(&self, index: usize) -> f32 {
        self.frames[index].at + self.start_offset
    }
}

/// Builder for constructing validated timelines.
#[derive(Debug)]
pub struct TimelineBuilder<const N: usize> {
    frames: Vec<Keyframe, N>,
    start_offset: f32,
    mode: SequenceMode,
    overflowed: bool,
}

impl<const N: usize> TimelineBuilder<N> {
    /// Creates a new empty timeline builder.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            start_offset: 0.0,
            mode: SequenceMode::Interpolated,
            overflowed: false,
        }
    }

    /// Adds a single-zone keyframe at the given beat offset.
    pub fn frame(self, color: Srgb, at: f32) -> Self {
        self.push(Keyframe::solid(color, at))
    }

    /// Adds a dual-zone keyframe at the given beat offset.
    pub fn split_frame(self, zone_a: Srgb, zone_b: Srgb, at: f32) -> Self {
        self.push(Keyframe::split(zone_a, zone_b, at))
    }

    /// Sets the sequencing mode.
    ///
    /// Default is [`SequenceMode::Interpolated`].
    pub fn mode(mut self, mode: SequenceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets a pre-roll offset in beats, added to every keyframe offset.
    ///
    /// Used when the visible sequence must begin mid-song to line up with an
    /// external audio cue. Default is zero.
    pub fn start_offset(mut self, beats: f32) -> Self {
        self.start_offset = beats;
        self
    }

    /// Builds the timeline, validating the table invariants.
    ///
    /// # Errors
    /// * [`TimelineError::Empty`] - no keyframes were added
    /// * [`TimelineError::DecreasingOffset`] - offsets are not non-decreasing
    /// * [`TimelineError::CapacityExceeded`] - more than `N` keyframes added
    pub fn build(self) -> Result<Timeline<N>, TimelineError> {
        if self.overflowed {
            return Err(TimelineError::CapacityExceeded);
        }

        if self.frames.is_empty() {
            return Err(TimelineError::Empty);
        }

        for (index, pair) in self.frames.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(TimelineError::DecreasingOffset { index: index + 1 });
            }
        }

        Ok(Timeline {
            frames: self.frames,
            start_offset: self.start_offset,
            mode: self.mode,
        })
    }

    fn push(mut self, frame: Keyframe) -> Self {
        if self.frames.push(frame).is_err() {
            self.overflowed = true;
        }
        self
    }
}

impl<const N: usize> Default for TimelineBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SequenceMode, TimelineError, Zone};
    use palette::Srgb;

    const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);
    const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
    const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
    const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);

    fn colors_equal(a: Srgb, b: Srgb) -> bool {
        const EPSILON: f32 = 0.001;
        (a.red - b.red).abs() < EPSILON
            && (a.green - b.green).abs() < EPSILON
            && (a.blue - b.blue).abs() < EPSILON
    }

    #[test]
    fn build_rejects_empty_table() {
        let result = Timeline::<4>::builder().build();
        assert_eq!(result.unwrap_err(), TimelineError::Empty);
    }

    #[test]
    fn build_rejects_decreasing_offsets() {
        let result = Timeline::<4>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 4.0)
            .frame(BLUE, 2.0)
            .build();
        assert_eq!(result.unwrap_err(), TimelineError::DecreasingOffset { index: 2 });
    }

    #[test]
    fn build_rejects_overflowing_table() {
        let result = Timeline::<2>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 1.0)
            .frame(BLUE, 2.0)
            .build();
        assert_eq!(result.unwrap_err(), TimelineError::CapacityExceeded);
    }

    #[test]
    fn build_accepts_equal_offsets() {
        let timeline = Timeline::<4>::builder()
            .frame(RED, 4.0)
            .frame(GREEN, 4.0)
            .build();
        assert!(timeline.is_ok());
    }

    #[test]
    fn stepped_output_is_a_step_function() {
        let timeline = Timeline::<4>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 4.0)
            .frame(BLUE, 8.0)
            .mode(SequenceMode::Stepped)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        // Constant between offsets, changing only at boundaries.
        for elapsed in [0.0, 1.0, 3.99] {
            let (colors, done) = timeline.sample(&mut cursor, elapsed);
            assert!(colors_equal(colors.a, RED), "at {} beats", elapsed);
            assert!(!done);
        }
        for elapsed in [4.0, 5.5, 7.99] {
            let (colors, done) = timeline.sample(&mut cursor, elapsed);
            assert!(colors_equal(colors.a, GREEN), "at {} beats", elapsed);
            assert!(!done);
        }
        for elapsed in [8.0, 12.0, 100.0] {
            let (colors, done) = timeline.sample(&mut cursor, elapsed);
            assert!(colors_equal(colors.a, BLUE), "at {} beats", elapsed);
            assert!(done);
        }
    }

    #[test]
    fn interpolated_output_is_convex_between_offsets() {
        let timeline = Timeline::<2>::builder()
            .frame(BLACK, 0.0)
            .frame(WHITE, 10.0)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        let (colors, done) = timeline.sample(&mut cursor, 0.0);
        assert!(colors_equal(colors.a, BLACK));
        assert!(!done);

        let (colors, _) = timeline.sample(&mut cursor, 5.0);
        assert!(colors_equal(colors.a, Srgb::new(0.5, 0.5, 0.5)));

        let (colors, _) = timeline.sample(&mut cursor, 2.5);
        // Cursor never goes back; elapsed is monotonic in practice, but even
        // a stale sample stays a convex combination of the bracketing colors.
        assert!(colors.a.red >= 0.0 && colors.a.red <= 1.0);

        let (colors, done) = timeline.sample(&mut cursor, 10.0);
        assert!(colors_equal(colors.a, WHITE));
        assert!(done);

        let (colors, done) = timeline.sample(&mut cursor, 15.0);
        assert!(colors_equal(colors.a, WHITE));
        assert!(done);
    }

    #[test]
    fn interpolated_output_is_exact_at_offsets() {
        let timeline = Timeline::<4>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 4.0)
            .frame(BLUE, 8.0)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        let (colors, _) = timeline.sample(&mut cursor, 0.0);
        assert!(colors_equal(colors.a, RED));
        let (colors, _) = timeline.sample(&mut cursor, 4.0);
        assert!(colors_equal(colors.a, GREEN));
        let (colors, _) = timeline.sample(&mut cursor, 8.0);
        assert!(colors_equal(colors.a, BLUE));
    }

    #[test]
    fn first_color_held_before_first_offset() {
        // A start offset pushes the whole table into the future; until the
        // first effective offset passes, the first keyframe's color holds.
        let timeline = Timeline::<2>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 4.0)
            .start_offset(28.0)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        let (colors, done) = timeline.sample(&mut cursor, 10.0);
        assert!(colors_equal(colors.a, RED));
        assert!(!done);

        let (colors, _) = timeline.sample(&mut cursor, 30.0);
        assert!(colors_equal(colors.a, Srgb::new(0.5, 0.5, 0.0)));

        let (colors, done) = timeline.sample(&mut cursor, 32.0);
        assert!(colors_equal(colors.a, GREEN));
        assert!(done);
    }

    #[test]
    fn equal_offsets_produce_a_hard_cut() {
        let timeline = Timeline::<4>::builder()
            .frame(BLUE, 0.0)
            .frame(BLUE, 4.0)
            .frame(RED, 4.0)
            .frame(RED, 8.0)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        let (colors, _) = timeline.sample(&mut cursor, 3.99);
        assert!(colors_equal(colors.a, BLUE));

        // The instant the shared offset passes, output snaps to the later
        // keyframe with no interpolation ramp.
        let (colors, _) = timeline.sample(&mut cursor, 4.0);
        assert!(colors_equal(colors.a, RED));
    }

    #[test]
    fn cursor_advances_monotonically() {
        let timeline = Timeline::<4>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 4.0)
            .frame(BLUE, 8.0)
            .mode(SequenceMode::Stepped)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        timeline.sample(&mut cursor, 6.0);
        assert_eq!(cursor.index(), 1);

        // An earlier elapsed value never moves the cursor back.
        timeline.sample(&mut cursor, 1.0);
        assert_eq!(cursor.index(), 1);

        timeline.sample(&mut cursor, 8.0);
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn done_is_monotonic_until_reset() {
        let timeline = Timeline::<2>::builder()
            .frame(RED, 0.0)
            .frame(GREEN, 4.0)
            .mode(SequenceMode::Stepped)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        let (_, done) = timeline.sample(&mut cursor, 3.0);
        assert!(!done);
        let (_, done) = timeline.sample(&mut cursor, 4.0);
        assert!(done);
        let (_, done) = timeline.sample(&mut cursor, 100.0);
        assert!(done);

        cursor.reset();
        let (_, done) = timeline.sample(&mut cursor, 0.0);
        assert!(!done);
    }

    #[test]
    fn single_keyframe_timeline_completes_at_its_offset() {
        let timeline = Timeline::<1>::builder().frame(RED, 2.0).build().unwrap();
        let mut cursor = Cursor::new();

        let (colors, done) = timeline.sample(&mut cursor, 0.0);
        assert!(colors_equal(colors.a, RED));
        assert!(!done);

        let (_, done) = timeline.sample(&mut cursor, 2.0);
        assert!(done);
    }

    #[test]
    fn dual_zone_keyframes_interpolate_per_zone() {
        let timeline = Timeline::<2>::builder()
            .split_frame(RED, BLUE, 0.0)
            .split_frame(BLUE, RED, 10.0)
            .build()
            .unwrap();
        let mut cursor = Cursor::new();

        let (colors, _) = timeline.sample(&mut cursor, 5.0);
        assert!(colors_equal(colors.for_zone(Zone::A), Srgb::new(0.5, 0.0, 0.5)));
        assert!(colors_equal(colors.for_zone(Zone::B), Srgb::new(0.5, 0.0, 0.5)));

        let (colors, _) = timeline.sample(&mut cursor, 10.0);
        assert!(colors_equal(colors.for_zone(Zone::A), BLUE));
        assert!(colors_equal(colors.for_zone(Zone::B), RED));
    }
}
